//! Column names shared by the raw sources and the canonical table.

pub const ID: &str = "ID";
pub const NAME: &str = "Name";
pub const SEX: &str = "Sex";
pub const AGE: &str = "Age";
pub const HEIGHT: &str = "Height";
pub const WEIGHT: &str = "Weight";
pub const TEAM: &str = "Team";
pub const NOC: &str = "NOC";
pub const GAMES: &str = "Games";
pub const YEAR: &str = "Year";
pub const SEASON: &str = "Season";
pub const CITY: &str = "City";
pub const SPORT: &str = "Sport";
pub const EVENT: &str = "Event";
pub const MEDAL: &str = "Medal";
pub const REGION: &str = "region";
pub const GOLD: &str = "Gold";
pub const SILVER: &str = "Silver";
pub const BRONZE: &str = "Bronze";

/// Fill value for categorical fields with no data.
pub const UNKNOWN: &str = "Unknown";

/// The only season kept in the canonical table.
pub const SUMMER: &str = "Summer";

/// Columns written by [`CanonicalTable::to_data_table`](super::CanonicalTable::to_data_table),
/// in order.
pub const CANONICAL_COLUMNS: [&str; 19] = [
    ID, NAME, SEX, AGE, HEIGHT, WEIGHT, TEAM, NOC, GAMES, YEAR, SEASON, CITY, SPORT, EVENT, MEDAL,
    REGION, GOLD, SILVER, BRONZE,
];

/// Columns every downstream view relies on; absent ones are backfilled.
pub const REQUIRED_COLUMNS: [&str; 10] =
    [YEAR, REGION, MEDAL, SPORT, NAME, CITY, EVENT, NOC, TEAM, GAMES];
