pub mod clock;
pub mod evaluator;
pub mod lookup;

pub use clock::parse_minutes;
pub use evaluator::{Countdown, DailyPrayers, FastingTimes};
pub use lookup::Schedule;
