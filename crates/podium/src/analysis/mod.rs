//! Aggregation library: pure views over the canonical table.
//!
//! Every function takes a `&CanonicalTable` plus typed filters and returns
//! a new value. An empty table, a filter that matches nothing, or a view
//! with no data gives an empty result, never an error. Results convert to
//! a tidy [`Frame`] through [`ToFrame`].

mod athletes;
mod dedup;
mod distribution;
mod frame;
mod overview;
mod pivot;
mod selection;
mod tally;
mod trends;

pub use athletes::{AthleteWins, TOP_ATHLETES, most_successful, most_successful_by_country};
pub use distribution::{
    AGE_BIN_SIZE, AgeDistribution, AnalysisConfig, DEFAULT_FEATURED_SPORTS, DensityPoint,
    Distribution, HistogramBin, MAX_HISTOGRAM_BINS, NO_MEDAL, PhysiquePoint, Summary,
    age_distribution, gold_age_distribution_by_sport, height_weight_scatter,
};
pub use frame::{Column, Frame, ToFrame};
pub use overview::{Overview, countries, overview, sport_list, sports};
pub use pivot::{PivotTable, country_sport_heatmap, events_per_sport_over_time};
pub use selection::{OVERALL, Selection};
pub use tally::{
    FilterOptions, FilteredTally, TallyRow, YearCount, YearTallyRow, country_year_list,
    fetch_medal_tally, medal_tally, yearwise_medal_tally,
};
pub use trends::{GenderPoint, Trend, TrendMetric, TrendPoint, data_over_time, gender_participation};
