//! Domain types and calculations for the research toolbox
//!
//! Every calculator is a pure function from a typed input record to a typed
//! result. Nothing here performs I/O or holds state between calls.

pub mod confidence;
pub mod constants;
pub mod dropoff;
pub mod numeric;
pub mod sample_size;
pub mod significance;
pub mod types;
pub mod weighting;

pub use confidence::{critical_value, ConfidenceLevel};
pub use dropoff::{predict_dropoff, DropoffInput, DropoffParameters, DropoffResult, QuestionMix};
pub use numeric::{clamp, normal_cdf};
pub use sample_size::{estimate_sample_size, SampleSizeInput, SampleSizeResult};
pub use significance::{
    compare_proportions, Direction, GroupInput, InputMode, SignificanceInput, SignificanceResult,
    Tail,
};
pub use types::{InterviewCount, Percentage, Proportion, SegmentLabel};
pub use weighting::{
    analyze_weighting, OutcomeShift, Segment, WeightedSegment, WeightingInput, WeightingResult,
};
