use super::value_objects::Tier;

/// Widgets on the main board a TIER_1 subscriber may use
pub const FREE_MAIN_BOARD_WIDGETS: usize = 3;

/// Whether the widget at `index` renders inert for this subscriber.
///
/// Computed per render, never stored. Locked widgets still occupy their
/// grid cell; the host blurs them and disables interaction.
pub fn is_locked(tier: Tier, is_main_board: bool, index: usize) -> bool {
    match tier {
        Tier::Tier1 if is_main_board => index >= FREE_MAIN_BOARD_WIDGETS,
        Tier::Tier1 => true,
        Tier::Tier2 | Tier::Tier3 => false,
    }
}
