pub mod duration;

pub use duration::{
    find_active_segment, format_clock, format_duration, is_time_in_segment, parse_duration,
    TimeSpan,
};
