pub mod cache;
pub mod provider;
pub mod snapshot;
pub mod stations;
pub mod waqi;

pub use cache::CachedProvider;
pub use provider::{GeoPoint, LiveIndexProvider, LiveReading};
pub use snapshot::{generate_daily_snapshot, DailySnapshot};
pub use stations::{map_center, ncr_stations, Station};
pub use waqi::{parse_feed, FeedError, WaqiClient};
