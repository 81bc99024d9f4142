use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The four mutually exclusive dashboard panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    CreateTier,
    ManageTiers,
    CreateTierConfig,
    ManageTierConfigs,
}

impl Panel {
    pub const ALL: [Panel; 4] = [
        Panel::CreateTier,
        Panel::ManageTiers,
        Panel::CreateTierConfig,
        Panel::ManageTierConfigs,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Panel::CreateTier => "Create Tier",
            Panel::ManageTiers => "Manage Tiers",
            Panel::CreateTierConfig => "Create Tier Config",
            Panel::ManageTierConfigs => "Manage Tier Configs",
        }
    }

    /// Stable key used in logs
    pub fn key(&self) -> &'static str {
        match self {
            Panel::CreateTier => "create-tier",
            Panel::ManageTiers => "manage-tiers",
            Panel::CreateTierConfig => "create-tier-config",
            Panel::ManageTierConfigs => "manage-tier-configs",
        }
    }

    pub fn index(&self) -> usize {
        Panel::ALL.iter().position(|p| p == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Panel> {
        Panel::ALL.get(index).copied()
    }

    pub fn next(&self) -> Panel {
        Panel::ALL[(self.index() + 1) % Panel::ALL.len()]
    }

    pub fn prev(&self) -> Panel {
        Panel::ALL[(self.index() + Panel::ALL.len() - 1) % Panel::ALL.len()]
    }

    /// True for the two table panels
    pub fn is_list(&self) -> bool {
        matches!(self, Panel::ManageTiers | Panel::ManageTierConfigs)
    }
}

/// A loyalty tier as returned by `loyalty/tier/list`.
///
/// The backend is inconsistent about field shapes (`id` vs `tier_id`, booleans
/// sent as numbers, numbers sent as strings), so records are read through
/// [`RawTier`] and normalized once here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawTier")]
pub struct Tier {
    pub id: Option<i64>,
    pub name: String,
    pub is_active: bool,
    pub is_special: bool,
    pub min_orders: Option<i64>,
    pub max_orders: Option<i64>,
    /// ORDER_ONLINE cashback as a fraction in 0..1
    pub order_online: Option<f64>,
}

#[derive(Deserialize)]
struct RawTier {
    id: Option<Value>,
    tier_id: Option<Value>,
    tier_name: Option<String>,
    is_active: Option<Value>,
    is_special: Option<Value>,
    no_of_purchase_from: Option<Value>,
    no_of_purchase_to: Option<Value>,
    constraints: Option<RawTierConstraints>,
}

#[derive(Deserialize)]
struct RawTierConstraints {
    #[serde(rename = "ORDER_ONLINE")]
    order_online: Option<Value>,
}

impl From<RawTier> for Tier {
    fn from(raw: RawTier) -> Self {
        Self {
            id: raw
                .id
                .as_ref()
                .and_then(as_i64)
                .or_else(|| raw.tier_id.as_ref().and_then(as_i64)),
            name: raw.tier_name.unwrap_or_default(),
            is_active: raw.is_active.as_ref().is_some_and(truthy),
            is_special: raw.is_special.as_ref().is_some_and(truthy),
            min_orders: raw.no_of_purchase_from.as_ref().and_then(as_i64),
            max_orders: raw.no_of_purchase_to.as_ref().and_then(as_i64),
            order_online: raw
                .constraints
                .and_then(|c| c.order_online)
                .as_ref()
                .and_then(as_f64),
        }
    }
}

/// A tier configuration as returned by `loyalty/config/list`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawTierConfig")]
pub struct TierConfig {
    pub id: Option<i64>,
    pub description: String,
    pub default_tier_id: Option<i64>,
    pub order_online: Ratio,
    pub referral: Ratio,
    pub review_product: Ratio,
}

/// One reward entry of a config's constraints map
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ratio {
    pub ratio_from: Option<String>,
    pub ratio_to: Option<String>,
    pub amount: Option<String>,
}

#[derive(Deserialize)]
struct RawTierConfig {
    id: Option<Value>,
    description: Option<String>,
    default_tier: Option<RawTierRef>,
    constraints: Option<RawConfigConstraints>,
}

#[derive(Deserialize)]
struct RawTierRef {
    id: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct RawConfigConstraints {
    order_online: Option<RawRatio>,
    referral: Option<RawRatio>,
    review_product: Option<RawRatio>,
}

#[derive(Deserialize)]
struct RawRatio {
    ratio_from: Option<Value>,
    ratio_to: Option<Value>,
    amount: Option<Value>,
}

impl From<RawRatio> for Ratio {
    fn from(raw: RawRatio) -> Self {
        Self {
            ratio_from: raw.ratio_from.as_ref().and_then(as_string),
            ratio_to: raw.ratio_to.as_ref().and_then(as_string),
            amount: raw.amount.as_ref().and_then(as_string),
        }
    }
}

impl From<RawTierConfig> for TierConfig {
    fn from(raw: RawTierConfig) -> Self {
        let (order_online, referral, review_product) = match raw.constraints {
            Some(c) => (
                c.order_online.map(Ratio::from).unwrap_or_default(),
                c.referral.map(Ratio::from).unwrap_or_default(),
                c.review_product.map(Ratio::from).unwrap_or_default(),
            ),
            None => Default::default(),
        };

        Self {
            id: raw.id.as_ref().and_then(as_i64),
            description: raw.description.unwrap_or_default(),
            default_tier_id: raw.default_tier.and_then(|t| t.id).as_ref().and_then(as_i64),
            order_online,
            referral,
            review_product,
        }
    }
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `operation` field of the update endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
}

/// Body of `POST loyalty/tier/update`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierPayload {
    pub tier_name: String,
    pub is_active: bool,
    pub is_special: bool,
    pub no_of_purchase_from: i64,
    pub no_of_purchase_to: i64,
    pub operation: Operation,
    pub constraints: TierPayloadConstraints,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct TierPayloadConstraints {
    pub order_online: f64,
    pub referral: u8,
    pub review_product: u8,
}

/// Body of `POST loyalty/config/update`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigPayload {
    pub description: String,
    pub default_tier: TierRef,
    pub operation: Operation,
    pub constraints: ConfigPayloadConstraints,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierRef {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ConfigPayloadConstraints {
    pub order_online: PointsRatio,
    pub referral: AmountRatio,
    pub review_product: AmountRatio,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointsRatio {
    pub ratio_from: String,
    pub ratio_to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmountRatio {
    pub ratio_from: String,
    pub ratio_to: String,
    pub amount: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Default,
    Destructive,
}

/// A toast shown in the footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Destructive,
        }
    }
}

/// Tracks whether the sidebar or the active panel has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelFocus {
    #[default]
    Sidebar,
    Content,
}

/// Record a delete confirmation refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Tier(i64),
    Config(i64),
}

impl DeleteTarget {
    pub fn prompt(&self) -> &'static str {
        match self {
            DeleteTarget::Tier(_) => "Are you sure you want to delete this tier?",
            DeleteTarget::Config(_) => "Are you sure you want to delete this configuration?",
        }
    }
}

/// Answer to a yes/no confirmation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Accepted,
    Declined,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    EnteringToken,
    EnteringUrl,
    ConfirmDelete(DeleteTarget),
}

/// Work the event loop hands back to the app for execution
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchTiers,
    FetchConfigs,
    SubmitTier,
    SubmitConfig,
    Delete(DeleteTarget, Confirmation),
    SaveToken(String),
    Logout,
    SaveBaseUrl(String),
}
