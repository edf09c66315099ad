//! # View Routing
//!
//! A tagged `View` enum replaces the original's string-keyed component
//! map: every screen the sidebar can open is a variant, and the route
//! guard decides per role instead of reading cookies in middleware.

use serde::{Deserialize, Serialize};

use kasir_core::types::{Location, Role};

use crate::session::AuthContext;

// =============================================================================
// Views
// =============================================================================

/// Every screen the shell can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    /// Admin landing page.
    Admin,
    /// Inventory overview with corrections.
    Dashboard,
    /// Sales entry for one channel.
    Penjualan { location: Location },
    /// Sales rows filtered by item id.
    TelusuriItem,
    /// Transaction history with payment-status correction.
    HistoryTransaksi,
    /// Stock transfer between locations.
    Pindahan,
    /// Goods return.
    ReturBarang,
    /// Goods receiving.
    TerimaBarang,
    /// Daily sales report.
    LaporanHarian,
    /// Monthly sales report.
    LaporanBulanan,
    /// Daily transfer history (grouped by transfer).
    PindahanHarian,
    /// Monthly transfer history.
    PindahanBulanan,
}

impl View {
    /// Sidebar title, matching the original section names.
    pub fn title(&self) -> String {
        match self {
            View::Admin => "Admin".to_string(),
            View::Dashboard => "Dashboard".to_string(),
            View::Penjualan { location } => match location {
                Location::Toko => "Penjualan Toko".to_string(),
                Location::Tiktok => "Penjualan TikTok".to_string(),
                Location::Gudang => "Penjualan Gudang".to_string(),
                Location::Rusak => "Penjualan".to_string(),
            },
            View::TelusuriItem => "Telusuri Item lewat ID".to_string(),
            View::HistoryTransaksi => "History Transaksi".to_string(),
            View::Pindahan => "Pindahan".to_string(),
            View::ReturBarang => "Retur Barang".to_string(),
            View::TerimaBarang => "Terima Barang".to_string(),
            View::LaporanHarian => "Penjualan Harian".to_string(),
            View::LaporanBulanan => "Penjualan Bulanan".to_string(),
            View::PindahanHarian => "Pindahan Harian".to_string(),
            View::PindahanBulanan => "Pindahan Bulanan".to_string(),
        }
    }

    /// The view a fresh login lands on.
    pub const fn landing_for(role: Role) -> View {
        match role {
            Role::Admin => View::Admin,
            Role::User => View::Dashboard,
        }
    }

    /// Whether a role may open this view. Admin accounts stay on the
    /// admin page; user accounts get everything else.
    pub const fn allowed_for(&self, role: Role) -> bool {
        match self {
            View::Admin => matches!(role, Role::Admin),
            _ => matches!(role, Role::User),
        }
    }

    /// Sidebar entries for a user account, in display order. One sales
    /// entry per channel; rusak never gets one.
    pub fn user_sections() -> Vec<View> {
        let mut sections = vec![View::Dashboard];
        sections.extend(
            Location::sales_channels()
                .into_iter()
                .map(|location| View::Penjualan { location }),
        );
        sections.extend([
            View::TelusuriItem,
            View::HistoryTransaksi,
            View::Pindahan,
            View::ReturBarang,
            View::TerimaBarang,
            View::LaporanHarian,
            View::LaporanBulanan,
            View::PindahanHarian,
            View::PindahanBulanan,
        ]);
        sections
    }
}

// =============================================================================
// Route Guard
// =============================================================================

/// Result of resolving a requested view against the auth context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Show the requested view.
    Allowed(View),
    /// Nobody is logged in; show the login screen.
    RedirectLogin,
    /// Logged in, but the role does not get this view; land on the
    /// role's home instead.
    RedirectLanding(View),
}

/// The route guard. Replaces the cookie middleware: unauthenticated
/// requests go to login, cross-role requests bounce to the role's
/// landing view.
pub fn resolve(requested: View, auth: &AuthContext) -> RouteOutcome {
    let Some(role) = auth.current_role() else {
        return RouteOutcome::RedirectLogin;
    };
    if requested.allowed_for(role) {
        RouteOutcome::Allowed(requested)
    } else {
        RouteOutcome::RedirectLanding(View::landing_for(role))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    fn context_for(role: Role) -> AuthContext {
        AuthContext::from_session(Session {
            username: "test".to_string(),
            role,
        })
    }

    #[test]
    fn test_unauthenticated_redirects_to_login() {
        let outcome = resolve(View::Dashboard, &AuthContext::anonymous());
        assert_eq!(outcome, RouteOutcome::RedirectLogin);
    }

    #[test]
    fn test_user_gets_dashboard_admin_gets_admin() {
        let user = context_for(Role::User);
        assert_eq!(
            resolve(View::Dashboard, &user),
            RouteOutcome::Allowed(View::Dashboard)
        );
        assert_eq!(
            resolve(View::Admin, &user),
            RouteOutcome::RedirectLanding(View::Dashboard)
        );

        let admin = context_for(Role::Admin);
        assert_eq!(
            resolve(View::Admin, &admin),
            RouteOutcome::Allowed(View::Admin)
        );
        assert_eq!(
            resolve(View::Pindahan, &admin),
            RouteOutcome::RedirectLanding(View::Admin)
        );
    }

    #[test]
    fn test_titles_match_sidebar_sections() {
        assert_eq!(
            View::Penjualan {
                location: Location::Tiktok
            }
            .title(),
            "Penjualan TikTok"
        );
        assert_eq!(View::PindahanBulanan.title(), "Pindahan Bulanan");
    }

    #[test]
    fn test_user_sections_cover_all_non_admin_views() {
        let sections = View::user_sections();
        assert_eq!(sections.len(), 13);
        assert!(!sections.contains(&View::Admin));
    }
}
