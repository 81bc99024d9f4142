//! Conversions between form state and API shapes
//!
//! These are pure functions so the submission pipeline can be tested without a
//! network, and so the edit panels can be filled from list rows.

use crate::error::DashboardError;
use crate::forms::{ConfigForm, TierForm, DEFAULT_REWARD_AMOUNT};
use crate::types::{
    AmountRatio, ConfigPayload, ConfigPayloadConstraints, Operation, PointsRatio, Tier,
    TierConfig, TierPayload, TierPayloadConstraints, TierRef,
};

/// Cashback percentages must stay strictly below this
pub const MAX_CASHBACK_PERCENT: f64 = 100.0;

/// REFERRAL and REVIEW_PRODUCT ratios are fixed on both tiers and configs
const FIXED_RATIO: &str = "1";

/// Build the tier update body. Passing `editing_id` turns it into an update.
pub fn to_tier_payload(
    form: &TierForm,
    editing_id: Option<i64>,
) -> Result<TierPayload, DashboardError> {
    let percent = parse_number::<f64>(&form.cashback_percent).ok_or_else(|| {
        DashboardError::InvalidCashback("Cashback percentage must be a number.".to_string())
    })?;

    if percent >= MAX_CASHBACK_PERCENT {
        return Err(DashboardError::InvalidCashback(
            "Cashback percentage must be below 100.".to_string(),
        ));
    }

    let order_bound = |value: &str| {
        parse_number::<i64>(value).ok_or_else(|| {
            DashboardError::Validation("Order numbers must be whole numbers.".to_string())
        })
    };

    Ok(TierPayload {
        tier_name: form.name.clone(),
        is_active: form.is_active,
        is_special: form.is_special,
        no_of_purchase_from: order_bound(&form.min_orders)?,
        no_of_purchase_to: order_bound(&form.max_orders)?,
        operation: if editing_id.is_some() {
            Operation::Update
        } else {
            Operation::Create
        },
        constraints: TierPayloadConstraints {
            order_online: percent / 100.0,
            referral: 1,
            review_product: 1,
        },
        tier_id: editing_id,
    })
}

/// Fill the tier form from a list row
pub fn from_tier(tier: &Tier) -> TierForm {
    TierForm {
        name: tier.name.clone(),
        is_active: tier.is_active,
        is_special: tier.is_special,
        min_orders: tier.min_orders.map(|n| n.to_string()).unwrap_or_default(),
        max_orders: tier.max_orders.map(|n| n.to_string()).unwrap_or_default(),
        cashback_percent: tier
            .order_online
            .filter(|fraction| *fraction != 0.0)
            .map(percent_display)
            .unwrap_or_default(),
    }
}

/// Build the config update body. Always a create, even for an edited config.
pub fn to_config_payload(form: &ConfigForm) -> ConfigPayload {
    ConfigPayload {
        description: form.description.clone(),
        default_tier: TierRef {
            id: parse_number(&form.default_tier_id).unwrap_or(0),
        },
        operation: Operation::Create,
        constraints: ConfigPayloadConstraints {
            order_online: PointsRatio {
                ratio_from: form.required_points.clone(),
                ratio_to: form.cashback_reward.clone(),
            },
            referral: fixed_amount(&form.referral_amount),
            review_product: fixed_amount(&form.review_amount),
        },
    }
}

/// Fill the config form from a list row
pub fn from_config(config: &TierConfig) -> ConfigForm {
    ConfigForm {
        description: config.description.clone(),
        default_tier_id: config
            .default_tier_id
            .map(|id| id.to_string())
            .unwrap_or_default(),
        required_points: non_empty(&config.order_online.ratio_from).unwrap_or_default(),
        cashback_reward: non_empty(&config.order_online.ratio_to).unwrap_or_default(),
        referral_amount: non_empty(&config.referral.amount)
            .unwrap_or_else(|| DEFAULT_REWARD_AMOUNT.to_string()),
        review_amount: non_empty(&config.review_product.amount)
            .unwrap_or_else(|| DEFAULT_REWARD_AMOUNT.to_string()),
    }
}

/// Fraction (0.125) to the percent shown in the form ("12.5")
pub fn percent_display(fraction: f64) -> String {
    let percent = (fraction * 100.0 * 100.0).round() / 100.0;
    format!("{percent}")
}

fn fixed_amount(amount: &str) -> AmountRatio {
    AmountRatio {
        ratio_from: FIXED_RATIO.to_string(),
        ratio_to: FIXED_RATIO.to_string(),
        amount: amount.to_string(),
    }
}

// Empty input counts as zero.
fn parse_number<T: std::str::FromStr + Default>(value: &str) -> Option<T> {
    let value = value.trim();
    if value.is_empty() {
        return Some(T::default());
    }
    value.parse().ok()
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}
