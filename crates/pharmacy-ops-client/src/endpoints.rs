//! Backend API paths.

pub const INVENTORY: &str = "/inventory";
pub const INVENTORY_ADD: &str = "/inventory/add";
pub const DRUGS: &str = "/drugs";
pub const EXPIRY_ALERTS: &str = "/expiry/alerts";
pub const CHECKOUT: &str = "/billing/checkout";

// Read-only analytics
pub const FORECAST: &str = "/forecast";
pub const FORECAST_DETAIL: &str = "/forecast/detail";
pub const REORDER: &str = "/reorder";
pub const WASTE_ANALYTICS: &str = "/waste/analytics";
pub const REVENUE_RECOVERY: &str = "/revenue/recovery";
