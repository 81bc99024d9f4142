//! Form state for the two create/edit panels
//!
//! Every edit goes through [`TierForm::apply`] or [`ConfigForm::apply`], keyed by
//! field, so the event layer never touches form fields directly.

/// What kind of input a field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Flag,
    /// Whole numbers only
    Integer,
    /// Digits with at most one decimal point
    Decimal,
    /// Chosen from the loaded tier list
    TierPicker,
}

/// A single edit to one form field
#[derive(Debug, Clone, PartialEq)]
pub enum FormEdit {
    Set(String),
    Push(char),
    Backspace,
    Clear,
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TierField {
    #[default]
    Name,
    IsActive,
    IsSpecial,
    MinOrders,
    MaxOrders,
    CashbackPercent,
}

impl TierField {
    pub const ALL: [TierField; 6] = [
        TierField::Name,
        TierField::IsActive,
        TierField::IsSpecial,
        TierField::MinOrders,
        TierField::MaxOrders,
        TierField::CashbackPercent,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TierField::Name => "Tier Name",
            TierField::IsActive => "Active",
            TierField::IsSpecial => "Special",
            TierField::MinOrders => "Minimum Order Number",
            TierField::MaxOrders => "Maximum Order Number",
            TierField::CashbackPercent => "Order Online Cashback Percentage",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            TierField::Name => FieldKind::Text,
            TierField::IsActive | TierField::IsSpecial => FieldKind::Flag,
            TierField::MinOrders | TierField::MaxOrders => FieldKind::Integer,
            TierField::CashbackPercent => FieldKind::Decimal,
        }
    }

    pub fn next(&self) -> Self {
        step(&Self::ALL, self, 1)
    }

    pub fn prev(&self) -> Self {
        step(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigField {
    #[default]
    Description,
    DefaultTier,
    RequiredPoints,
    CashbackReward,
    ReferralAmount,
    ReviewAmount,
}

impl ConfigField {
    pub const ALL: [ConfigField; 6] = [
        ConfigField::Description,
        ConfigField::DefaultTier,
        ConfigField::RequiredPoints,
        ConfigField::CashbackReward,
        ConfigField::ReferralAmount,
        ConfigField::ReviewAmount,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ConfigField::Description => "Description",
            ConfigField::DefaultTier => "Default Tier",
            ConfigField::RequiredPoints => "Order Online: Required Points",
            ConfigField::CashbackReward => "Order Online: Cashback Reward Amount Ratio",
            ConfigField::ReferralAmount => "Referral: Required Points Amount",
            ConfigField::ReviewAmount => "Review Product: Required Points Amount",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            ConfigField::DefaultTier => FieldKind::TierPicker,
            _ => FieldKind::Text,
        }
    }

    pub fn next(&self) -> Self {
        step(&Self::ALL, self, 1)
    }

    pub fn prev(&self) -> Self {
        step(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

fn step<T: Copy + PartialEq>(all: &[T], current: &T, offset: usize) -> T {
    let index = all.iter().position(|f| f == current).unwrap_or(0);
    all[(index + offset) % all.len()]
}

/// Create/update tier form
#[derive(Debug, Clone, PartialEq)]
pub struct TierForm {
    pub name: String,
    pub is_active: bool,
    pub is_special: bool,
    pub min_orders: String,
    pub max_orders: String,
    pub cashback_percent: String,
}

impl Default for TierForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            is_active: true,
            is_special: false,
            min_orders: String::new(),
            max_orders: String::new(),
            cashback_percent: String::new(),
        }
    }
}

impl TierForm {
    /// Display value of a field
    pub fn value(&self, field: TierField) -> String {
        match field {
            TierField::Name => self.name.clone(),
            TierField::IsActive => self.is_active.to_string(),
            TierField::IsSpecial => self.is_special.to_string(),
            TierField::MinOrders => self.min_orders.clone(),
            TierField::MaxOrders => self.max_orders.clone(),
            TierField::CashbackPercent => self.cashback_percent.clone(),
        }
    }

    /// Apply an edit to one field, returns false when the edit was rejected
    pub fn apply(&mut self, field: TierField, edit: FormEdit) -> bool {
        match field {
            TierField::IsActive | TierField::IsSpecial => self.apply_flag(field, edit),
            TierField::Name => edit_text(&mut self.name, FieldKind::Text, edit),
            TierField::MinOrders => edit_text(&mut self.min_orders, field.kind(), edit),
            TierField::MaxOrders => edit_text(&mut self.max_orders, field.kind(), edit),
            TierField::CashbackPercent => {
                edit_text(&mut self.cashback_percent, field.kind(), edit)
            }
        }
    }

    // Changing either checkbox clears the other one.
    fn apply_flag(&mut self, field: TierField, edit: FormEdit) -> bool {
        let current = match field {
            TierField::IsActive => self.is_active,
            _ => self.is_special,
        };
        let checked = match edit {
            FormEdit::Toggle | FormEdit::Push(' ') => !current,
            FormEdit::Set(value) => match value.parse::<bool>() {
                Ok(v) => v,
                Err(_) => return false,
            },
            FormEdit::Clear => false,
            FormEdit::Push(_) | FormEdit::Backspace => return false,
        };

        self.is_active = field == TierField::IsActive && checked;
        self.is_special = field == TierField::IsSpecial && checked;
        true
    }
}

/// Create tier config form
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigForm {
    pub description: String,
    pub default_tier_id: String,
    pub required_points: String,
    pub cashback_reward: String,
    pub referral_amount: String,
    pub review_amount: String,
}

/// Referral and review amounts a fresh config form starts with
pub const DEFAULT_REWARD_AMOUNT: &str = "50";

impl Default for ConfigForm {
    fn default() -> Self {
        Self {
            description: String::new(),
            default_tier_id: String::new(),
            required_points: String::new(),
            cashback_reward: String::new(),
            referral_amount: DEFAULT_REWARD_AMOUNT.to_string(),
            review_amount: DEFAULT_REWARD_AMOUNT.to_string(),
        }
    }
}

impl ConfigForm {
    pub fn value(&self, field: ConfigField) -> &str {
        match field {
            ConfigField::Description => &self.description,
            ConfigField::DefaultTier => &self.default_tier_id,
            ConfigField::RequiredPoints => &self.required_points,
            ConfigField::CashbackReward => &self.cashback_reward,
            ConfigField::ReferralAmount => &self.referral_amount,
            ConfigField::ReviewAmount => &self.review_amount,
        }
    }

    fn value_mut(&mut self, field: ConfigField) -> &mut String {
        match field {
            ConfigField::Description => &mut self.description,
            ConfigField::DefaultTier => &mut self.default_tier_id,
            ConfigField::RequiredPoints => &mut self.required_points,
            ConfigField::CashbackReward => &mut self.cashback_reward,
            ConfigField::ReferralAmount => &mut self.referral_amount,
            ConfigField::ReviewAmount => &mut self.review_amount,
        }
    }

    /// Apply an edit to one field, returns false when the edit was rejected
    pub fn apply(&mut self, field: ConfigField, edit: FormEdit) -> bool {
        edit_text(self.value_mut(field), field.kind(), edit)
    }

    /// Move the default tier selection through the given tier ids
    pub fn cycle_default_tier(&mut self, tier_ids: &[i64], forward: bool) {
        if tier_ids.is_empty() {
            return;
        }

        let current = tier_ids
            .iter()
            .position(|id| id.to_string() == self.default_tier_id);

        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => tier_ids.len() - 1,
            (Some(i), true) => (i + 1) % tier_ids.len(),
            (Some(i), false) => (i + tier_ids.len() - 1) % tier_ids.len(),
        };

        self.default_tier_id = tier_ids[next].to_string();
    }
}

fn edit_text(value: &mut String, kind: FieldKind, edit: FormEdit) -> bool {
    match edit {
        FormEdit::Set(text) => {
            if !accepts_all(kind, &text) {
                return false;
            }
            *value = text;
        }
        FormEdit::Push(c) => {
            if !accepts(kind, value.contains('.'), c) {
                return false;
            }
            value.push(c);
        }
        FormEdit::Backspace => {
            value.pop();
        }
        FormEdit::Clear => value.clear(),
        FormEdit::Toggle => return false,
    }
    true
}

fn accepts_all(kind: FieldKind, text: &str) -> bool {
    let mut has_dot = false;
    text.chars().all(|c| {
        let ok = accepts(kind, has_dot, c);
        has_dot |= c == '.';
        ok
    })
}

fn accepts(kind: FieldKind, has_dot: bool, c: char) -> bool {
    match kind {
        FieldKind::Text => !c.is_control(),
        FieldKind::Integer => c.is_ascii_digit(),
        FieldKind::Decimal => c.is_ascii_digit() || (c == '.' && !has_dot),
        FieldKind::TierPicker => c.is_ascii_digit(),
        FieldKind::Flag => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_form_defaults() {
        let form = TierForm::default();
        assert!(form.is_active);
        assert!(!form.is_special);
        assert_eq!(form.cashback_percent, "");
    }

    #[test]
    fn test_config_form_defaults_restore_reward_amounts() {
        let form = ConfigForm::default();
        assert_eq!(form.referral_amount, "50");
        assert_eq!(form.review_amount, "50");
        assert_eq!(form.default_tier_id, "");
    }

    #[test]
    fn test_toggling_flag_clears_the_other() {
        let mut form = TierForm::default();
        assert!(form.apply(TierField::IsSpecial, FormEdit::Toggle));
        assert!(form.is_special);
        assert!(!form.is_active);

        assert!(form.apply(TierField::IsActive, FormEdit::Toggle));
        assert!(form.is_active);
        assert!(!form.is_special);

        // unchecking leaves both off
        assert!(form.apply(TierField::IsActive, FormEdit::Toggle));
        assert!(!form.is_active);
        assert!(!form.is_special);
    }

    #[test]
    fn test_integer_field_rejects_non_digits() {
        let mut form = TierForm::default();
        assert!(form.apply(TierField::MinOrders, FormEdit::Push('4')));
        assert!(!form.apply(TierField::MinOrders, FormEdit::Push('.')));
        assert!(!form.apply(TierField::MinOrders, FormEdit::Push('x')));
        assert!(form.apply(TierField::MinOrders, FormEdit::Push('2')));
        assert_eq!(form.min_orders, "42");
    }

    #[test]
    fn test_decimal_field_allows_single_dot() {
        let mut form = TierForm::default();
        for c in "12.5".chars() {
            assert!(form.apply(TierField::CashbackPercent, FormEdit::Push(c)));
        }
        assert!(!form.apply(TierField::CashbackPercent, FormEdit::Push('.')));
        assert_eq!(form.cashback_percent, "12.5");

        assert!(!form.apply(TierField::CashbackPercent, FormEdit::Set("1.2.3".to_string())));
        assert!(form.apply(TierField::CashbackPercent, FormEdit::Set("99.99".to_string())));
        assert_eq!(form.cashback_percent, "99.99");
    }

    #[test]
    fn test_text_edits() {
        let mut form = TierForm::default();
        form.apply(TierField::Name, FormEdit::Set("Gold".to_string()));
        form.apply(TierField::Name, FormEdit::Push('!'));
        assert_eq!(form.name, "Gold!");

        form.apply(TierField::Name, FormEdit::Backspace);
        assert_eq!(form.name, "Gold");

        form.apply(TierField::Name, FormEdit::Clear);
        assert_eq!(form.name, "");
        assert!(!form.apply(TierField::Name, FormEdit::Toggle));
    }

    #[test]
    fn test_field_navigation_wraps() {
        assert_eq!(TierField::CashbackPercent.next(), TierField::Name);
        assert_eq!(TierField::Name.prev(), TierField::CashbackPercent);
        assert_eq!(ConfigField::Description.next(), ConfigField::DefaultTier);
        assert_eq!(ConfigField::Description.prev(), ConfigField::ReviewAmount);
    }

    #[test]
    fn test_cycle_default_tier() {
        let mut form = ConfigForm::default();
        let ids = [3, 7, 9];

        form.cycle_default_tier(&ids, true);
        assert_eq!(form.default_tier_id, "3");
        form.cycle_default_tier(&ids, true);
        assert_eq!(form.default_tier_id, "7");
        form.cycle_default_tier(&ids, false);
        form.cycle_default_tier(&ids, false);
        assert_eq!(form.default_tier_id, "9");

        form.cycle_default_tier(&[], true);
        assert_eq!(form.default_tier_id, "9");
    }

    #[test]
    fn test_config_edit_keyed_by_field() {
        let mut form = ConfigForm::default();
        form.apply(ConfigField::ReferralAmount, FormEdit::Clear);
        form.apply(ConfigField::ReferralAmount, FormEdit::Push('7'));
        assert_eq!(form.value(ConfigField::ReferralAmount), "7");
        assert!(!form.apply(ConfigField::DefaultTier, FormEdit::Push('a')));
    }
}
