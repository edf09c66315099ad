//! # Pindahan: Stock Transfer Screen
//!
//! Moves stock between locations. Validation (all fields present,
//! source differs from destination) runs before the confirm dialog, so
//! a bad form never produces a request. Several items can be staged
//! into one batch; a batch submits through the bulk endpoint under a
//! single client-generated `group_id` so the history screen can show
//! the transfer as one group.

use tracing::debug;
use uuid::Uuid;

use kasir_client::types::{BulkTransferRequest, TransferItem, TransferRequest};
use kasir_client::ApiClient;
use kasir_core::types::Location;
use kasir_core::validation::validate_transfer;

use crate::error::{Notice, ScreenError, ScreenResult};

// =============================================================================
// Screen State
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferPhase {
    #[default]
    Editing,
    Confirming,
    Submitting,
}

/// State for the transfer form.
#[derive(Debug, Default)]
pub struct TransferScreen {
    pub source: Option<Location>,
    pub destination: Option<Location>,
    pub item_id: String,
    pub quantity: Option<i64>,
    pub description: String,
    staged: Vec<TransferItem>,
    phase: TransferPhase,
    notice: Option<Notice>,
}

impl TransferScreen {
    pub fn new() -> Self {
        TransferScreen::default()
    }

    pub fn phase(&self) -> TransferPhase {
        self.phase
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn staged(&self) -> &[TransferItem] {
        &self.staged
    }

    /// Validates the current fields and stages the item into the batch,
    /// clearing the per-item fields for the next entry. Source and
    /// destination stay put; a batch moves between one pair of
    /// locations.
    pub fn stage_item(&mut self) -> ScreenResult<()> {
        self.validated_fields()?;
        self.staged.push(TransferItem {
            item_id: self.item_id.trim().to_string(),
            quantity: self.quantity.unwrap_or(0),
        });
        self.item_id.clear();
        self.quantity = None;
        Ok(())
    }

    /// `Editing -> Confirming` once the form validates. The same-location
    /// rejection happens here, before anything touches the network.
    pub fn open_confirm(&mut self) -> ScreenResult<()> {
        if self.phase != TransferPhase::Editing {
            return Err(ScreenError::WrongPhase {
                action: "open the confirm dialog",
            });
        }
        if self.staged.is_empty() {
            self.validated_fields()?;
        } else {
            // Batch mode: endpoints were validated when items staged;
            // re-check they are still distinct.
            self.validated_endpoints()?;
        }
        self.phase = TransferPhase::Confirming;
        Ok(())
    }

    /// Text for the confirm dialog, e.g.
    /// `Anda yakin memindahkan 3x BRG-001 dari gudang ke toko?`.
    pub fn confirmation_text(&self) -> String {
        let (source, destination) = match (self.source, self.destination) {
            (Some(s), Some(d)) => (s, d),
            _ => return String::new(),
        };
        if self.staged.is_empty() {
            format!(
                "Anda yakin memindahkan {}x {} dari {} ke {}?",
                self.quantity.unwrap_or(0),
                self.item_id,
                source,
                destination
            )
        } else {
            format!(
                "Anda yakin memindahkan {} barang dari {} ke {}?",
                self.staged.len(),
                source,
                destination
            )
        }
    }

    pub fn cancel(&mut self) {
        if self.phase != TransferPhase::Submitting {
            self.phase = TransferPhase::Editing;
        }
    }

    /// `Confirming -> Submitting`. Single item posts the plain transfer
    /// body; a staged batch posts the bulk body with a fresh `group_id`.
    /// Success clears the form, failure preserves it.
    pub async fn submit(&mut self, client: &ApiClient) -> ScreenResult<()> {
        if self.phase == TransferPhase::Submitting {
            return Err(ScreenError::SubmissionInFlight);
        }
        if self.phase != TransferPhase::Confirming {
            return Err(ScreenError::WrongPhase { action: "submit" });
        }
        self.phase = TransferPhase::Submitting;

        let result = if self.staged.is_empty() {
            let body = self.single_request();
            debug!(item_id = %body.item_id, "submitting transfer");
            client.transfers().transfer(&body).await
        } else {
            let body = self.bulk_request();
            debug!(group_id = %body.group_id, items = body.items.len(), "submitting bulk transfer");
            client.transfers().transfer_bulk(&body).await
        };

        match result {
            Ok(()) => {
                self.clear();
                self.notice = Some(Notice::success("Item transferred successfully!"));
                Ok(())
            }
            Err(err) => {
                self.phase = TransferPhase::Editing;
                self.notice = Some(Notice::error("Error transferring item. Please try again."));
                Err(err.into())
            }
        }
    }

    // -------------------------------------------------------------------------
    // Request Builders
    // -------------------------------------------------------------------------

    fn single_request(&self) -> TransferRequest {
        TransferRequest {
            // Phase guard means these validated as present.
            source: self.source.unwrap_or(Location::Gudang),
            destination: self.destination.unwrap_or(Location::Toko),
            item_id: self.item_id.trim().to_string(),
            quantity: self.quantity.unwrap_or(0),
            description: self.description.clone(),
        }
    }

    fn bulk_request(&self) -> BulkTransferRequest {
        BulkTransferRequest {
            source: self.source.unwrap_or(Location::Gudang),
            destination: self.destination.unwrap_or(Location::Toko),
            group_id: Uuid::new_v4().to_string(),
            items: self.staged.clone(),
        }
    }

    // -------------------------------------------------------------------------
    // Validation Helpers
    // -------------------------------------------------------------------------

    fn validated_fields(&mut self) -> ScreenResult<()> {
        match validate_transfer(
            self.source,
            self.destination,
            &self.item_id,
            self.quantity.unwrap_or(0),
            &self.description,
        ) {
            Ok(_) => {
                self.notice = None;
                Ok(())
            }
            Err(err) => {
                self.notice = Some(Notice::error(match &err {
                    kasir_core::CoreError::SameLocation { .. } => {
                        "Source and Destination must be different."
                    }
                    _ => "All fields are required.",
                }));
                Err(err.into())
            }
        }
    }

    fn validated_endpoints(&mut self) -> ScreenResult<()> {
        match (self.source, self.destination) {
            (Some(s), Some(d)) if s == d => {
                self.notice = Some(Notice::error("Source and Destination must be different."));
                Err(kasir_core::CoreError::SameLocation {
                    location: s.to_string(),
                }
                .into())
            }
            (Some(_), Some(_)) => Ok(()),
            _ => {
                self.notice = Some(Notice::error("All fields are required."));
                Err(kasir_core::ValidationError::Required {
                    field: "source".to_string(),
                }
                .into())
            }
        }
    }

    fn clear(&mut self) {
        self.source = None;
        self.destination = None;
        self.item_id.clear();
        self.quantity = None;
        self.description.clear();
        self.staged.clear();
        self.phase = TransferPhase::Editing;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
