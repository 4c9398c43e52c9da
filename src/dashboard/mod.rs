//! Role dashboards
//!
//! Maps a signed-in role to its landing route and tab set, and types the
//! system-health record the admin and IT views display.

use crate::core::auth::UserRole;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tab inside a role dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DashboardTab {
    Overview,
    Users,
    Barns,
    Billing,
    System,
    Infrastructure,
    Cameras,
    Tickets,
    Clients,
    Commissions,
    Resources,
    Horses,
    Staff,
    Alerts,
    Reports,
    Patients,
    HealthRecords,
    Appointments,
    LiveFeed,
    Settings,
}

impl DashboardTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            DashboardTab::Overview => "overview",
            DashboardTab::Users => "users",
            DashboardTab::Barns => "barns",
            DashboardTab::Billing => "billing",
            DashboardTab::System => "system",
            DashboardTab::Infrastructure => "infrastructure",
            DashboardTab::Cameras => "cameras",
            DashboardTab::Tickets => "tickets",
            DashboardTab::Clients => "clients",
            DashboardTab::Commissions => "commissions",
            DashboardTab::Resources => "resources",
            DashboardTab::Horses => "horses",
            DashboardTab::Staff => "staff",
            DashboardTab::Alerts => "alerts",
            DashboardTab::Reports => "reports",
            DashboardTab::Patients => "patients",
            DashboardTab::HealthRecords => "health-records",
            DashboardTab::Appointments => "appointments",
            DashboardTab::LiveFeed => "live-feed",
            DashboardTab::Settings => "settings",
        }
    }
}

impl fmt::Display for DashboardTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical route name of a role's landing dashboard
pub fn dashboard_route(role: UserRole) -> &'static str {
    match role {
        UserRole::Admin => "admin-dashboard",
        UserRole::ItSupport => "it-support-dashboard",
        UserRole::Partner => "partner-dashboard",
        UserRole::Manager => "manager-dashboard",
        UserRole::Veterinarian => "vet-dashboard",
        UserRole::Owner => "smart-dashboard",
    }
}

/// Ordered tabs for a role; the first is the landing tab
pub fn dashboard_tabs(role: UserRole) -> &'static [DashboardTab] {
    use DashboardTab::*;
    match role {
        UserRole::Admin => &[Overview, Users, Barns, Billing, System],
        UserRole::ItSupport => &[Overview, Infrastructure, Cameras, Tickets],
        UserRole::Partner => &[Overview, Clients, Commissions, Resources],
        UserRole::Manager => &[Overview, Horses, Staff, Alerts, Reports],
        UserRole::Veterinarian => &[Overview, Patients, HealthRecords, Appointments],
        UserRole::Owner => &[LiveFeed, Horses, Alerts, Settings],
    }
}

/// Where a successful login lands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRoute {
    pub route: String,
    pub tabs: Vec<DashboardTab>,
}

impl DashboardRoute {
    pub fn for_role(role: UserRole) -> Self {
        Self {
            route: dashboard_route(role).to_string(),
            tabs: dashboard_tabs(role).to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{role} dashboard has no '{tab}' tab")]
pub struct TabNotAvailable {
    pub role: UserRole,
    pub tab: DashboardTab,
}

/// Tab selection state for one dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    role: UserRole,
    active_tab: DashboardTab,
}

impl DashboardView {
    pub fn new(role: UserRole) -> Self {
        Self {
            role,
            active_tab: dashboard_tabs(role)[0],
        }
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn active_tab(&self) -> DashboardTab {
        self.active_tab
    }

    pub fn tabs(&self) -> &'static [DashboardTab] {
        dashboard_tabs(self.role)
    }

    /// Switch tabs; the active tab is unchanged on error
    pub fn select(&mut self, tab: DashboardTab) -> Result<(), TabNotAvailable> {
        if !self.tabs().contains(&tab) {
            return Err(TabNotAvailable {
                role: self.role,
                tab,
            });
        }
        self.active_tab = tab;
        Ok(())
    }
}

/// Derived health of the monitoring platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Critical,
}

const DEGRADED_USAGE: f64 = 75.0;
const CRITICAL_USAGE: f64 = 90.0;
const DEGRADED_UPTIME: f64 = 99.0;
const CRITICAL_UPTIME: f64 = 95.0;

/// Platform health snapshot; usage and uptime are percentages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealth {
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub disk_usage: f64,
    pub uptime: f64,
    pub active_cameras: u32,
    pub total_cameras: u32,
}

impl SystemHealth {
    pub fn status(&self) -> HealthStatus {
        let peak = self.cpu_usage.max(self.memory_usage).max(self.disk_usage);
        let cameras_down = self.active_cameras < self.total_cameras;

        if peak >= CRITICAL_USAGE
            || self.uptime < CRITICAL_UPTIME
            || (self.total_cameras > 0 && self.active_cameras == 0)
        {
            HealthStatus::Critical
        } else if peak >= DEGRADED_USAGE || self.uptime < DEGRADED_UPTIME || cameras_down {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        }
    }

    /// Share of cameras streaming, as a percentage
    pub fn camera_availability(&self) -> f64 {
        if self.total_cameras == 0 {
            return 100.0;
        }
        f64::from(self.active_cameras) / f64::from(self.total_cameras) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn health() -> SystemHealth {
        SystemHealth {
            cpu_usage: 42.0,
            memory_usage: 61.5,
            disk_usage: 38.0,
            uptime: 99.97,
            active_cameras: 48,
            total_cameras: 48,
        }
    }

    #[test]
    fn test_routes() {
        assert_eq!(dashboard_route(UserRole::Owner), "smart-dashboard");
        assert_eq!(dashboard_route(UserRole::Admin), "admin-dashboard");
        for role in UserRole::ALL {
            assert!(dashboard_route(role).ends_with("-dashboard"));
            assert!(!dashboard_tabs(role).is_empty());
        }
    }

    #[test]
    fn test_view_starts_on_first_tab() {
        let view = DashboardView::new(UserRole::Owner);
        assert_eq!(view.active_tab(), DashboardTab::LiveFeed);
    }

    #[test]
    fn test_select_tab() {
        let mut view = DashboardView::new(UserRole::Admin);
        view.select(DashboardTab::Billing).unwrap();
        assert_eq!(view.active_tab(), DashboardTab::Billing);
    }

    #[test]
    fn test_select_foreign_tab_rejected() {
        let mut view = DashboardView::new(UserRole::Partner);
        let err = view.select(DashboardTab::Patients).unwrap_err();
        assert_eq!(err.to_string(), "partner dashboard has no 'patients' tab");
        assert_eq!(view.active_tab(), DashboardTab::Overview);
    }

    #[test]
    fn test_route_serialization() {
        let json = serde_json::to_value(DashboardRoute::for_role(UserRole::Veterinarian)).unwrap();
        assert_eq!(json["route"], "vet-dashboard");
        assert_eq!(json["tabs"][2], "health-records");
    }

    #[test]
    fn test_health_status() {
        assert_eq!(health().status(), HealthStatus::Healthy);

        let busy = SystemHealth {
            cpu_usage: 80.0,
            ..health()
        };
        assert_eq!(busy.status(), HealthStatus::Degraded);

        let camera_out = SystemHealth {
            active_cameras: 46,
            ..health()
        };
        assert_eq!(camera_out.status(), HealthStatus::Degraded);

        let full_disk = SystemHealth {
            disk_usage: 95.0,
            ..health()
        };
        assert_eq!(full_disk.status(), HealthStatus::Critical);

        let dark = SystemHealth {
            active_cameras: 0,
            ..health()
        };
        assert_eq!(dark.status(), HealthStatus::Critical);
    }

    #[test]
    fn test_camera_availability() {
        let half = SystemHealth {
            active_cameras: 24,
            ..health()
        };
        assert_eq!(half.camera_availability(), 50.0);
        let none = SystemHealth {
            active_cameras: 0,
            total_cameras: 0,
            ..health()
        };
        assert_eq!(none.camera_availability(), 100.0);
        assert_eq!(none.status(), HealthStatus::Healthy);
    }
}
