//! Lookup filter settings toggled from the settings screen.

/// One toggleable lookup filter, in display order.
///
/// Enabling an option lets the matching entries through; every option is
/// disabled by default, so every exclusion starts active.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FilterOption {
    Phrases,
    ZeroRated,
    Abbreviations,
    NetworkSlang,
    PlaceNames,
    Medical,
    Pharmacological,
    Chemical,
    Parentheses,
}

impl FilterOption {
    pub const COUNT: usize = 9;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Phrases,
        Self::ZeroRated,
        Self::Abbreviations,
        Self::NetworkSlang,
        Self::PlaceNames,
        Self::Medical,
        Self::Pharmacological,
        Self::Chemical,
        Self::Parentheses,
    ];

    /// Label shown on the settings screen.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Phrases => "词组",
            Self::ZeroRated => "柯林斯 0 星",
            Self::Abbreviations => "缩写 abbr.",
            Self::NetworkSlang => "[网络]",
            Self::PlaceNames => "[地名]",
            Self::Medical => "[医]",
            Self::Pharmacological => "[药]",
            Self::Chemical => "[化]",
            Self::Parentheses => "包含括号",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.label() == label)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FilterSettings {
    pub phrases: bool,
    pub zero_rated: bool,
    pub abbreviations: bool,
    pub network_slang: bool,
    pub place_names: bool,
    pub medical: bool,
    pub pharmacological: bool,
    pub chemical: bool,
    pub parentheses: bool,
}

impl FilterSettings {
    pub const fn new() -> Self {
        Self {
            phrases: false,
            zero_rated: false,
            abbreviations: false,
            network_slang: false,
            place_names: false,
            medical: false,
            pharmacological: false,
            chemical: false,
            parentheses: false,
        }
    }

    /// Settings with every option enabled, i.e. no exclusion at all.
    pub const fn permissive() -> Self {
        Self {
            phrases: true,
            zero_rated: true,
            abbreviations: true,
            network_slang: true,
            place_names: true,
            medical: true,
            pharmacological: true,
            chemical: true,
            parentheses: true,
        }
    }

    pub const fn with(mut self, option: FilterOption, enabled: bool) -> Self {
        *self.slot_mut(option) = enabled;
        self
    }

    pub const fn is_enabled(&self, option: FilterOption) -> bool {
        match option {
            FilterOption::Phrases => self.phrases,
            FilterOption::ZeroRated => self.zero_rated,
            FilterOption::Abbreviations => self.abbreviations,
            FilterOption::NetworkSlang => self.network_slang,
            FilterOption::PlaceNames => self.place_names,
            FilterOption::Medical => self.medical,
            FilterOption::Pharmacological => self.pharmacological,
            FilterOption::Chemical => self.chemical,
            FilterOption::Parentheses => self.parentheses,
        }
    }

    pub fn set(&mut self, option: FilterOption, enabled: bool) {
        *self.slot_mut(option) = enabled;
    }

    /// Flips `option` and returns its new state.
    pub fn toggle(&mut self, option: FilterOption) -> bool {
        let slot = self.slot_mut(option);
        *slot = !*slot;
        *slot
    }

    /// Options paired with their state, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (FilterOption, bool)> + '_ {
        FilterOption::ALL
            .into_iter()
            .map(|option| (option, self.is_enabled(option)))
    }

    const fn slot_mut(&mut self, option: FilterOption) -> &mut bool {
        match option {
            FilterOption::Phrases => &mut self.phrases,
            FilterOption::ZeroRated => &mut self.zero_rated,
            FilterOption::Abbreviations => &mut self.abbreviations,
            FilterOption::NetworkSlang => &mut self.network_slang,
            FilterOption::PlaceNames => &mut self.place_names,
            FilterOption::Medical => &mut self.medical,
            FilterOption::Pharmacological => &mut self.pharmacological,
            FilterOption::Chemical => &mut self.chemical,
            FilterOption::Parentheses => &mut self.parentheses,
        }
    }
}
