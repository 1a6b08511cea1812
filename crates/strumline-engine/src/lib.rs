// Four-lane note pipeline, chord hit detection and fixed-priority scoring

mod autoplay;
mod chart;
pub mod config;
mod engine;
mod flash;
mod hit_detector;
mod input;
pub mod lane;
mod note;
mod render;
mod score_engine;

pub use autoplay::Autoplay;
pub use chart::{ChartSource, VecChart};
pub use config::{EngineConfig, ScoreRule};
pub use engine::{Engine, TickReport};
pub use flash::FlashState;
pub use hit_detector::{Chord, HitDecision, HitDetector, StrumEvent};
pub use input::{InputDevice, InputFrame, ScriptedInput};
pub use lane::{HIT_ZONE, LANE_LENGTH, Lane, LaneInput, ZoneSummary};
pub use note::{ChartRow, LANE_COUNT, NoteCell, Slot};
pub use render::{DisplayRenderer, EngineView};
pub use score_engine::{ScoreEngine, ScoreInputs, ScoreOutcome, ScoreSource, ScoreState};
