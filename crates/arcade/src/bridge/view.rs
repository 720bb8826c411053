//! View models serialized to JSON for the TypeScript shell.
//! The shell renders these as-is; it never reaches into game state.

use serde::Serialize;

use crate::api::types::{GameKind, Outcome};
use crate::flow::gate::GateState;
use crate::flow::orchestrator::Screen;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArithmeticView {
    pub title: &'static str,
    pub question: String,
    pub time_left: u32,
    pub duration: u32,
    /// Width of the timer bar, 0–100.
    pub timer_percent: f32,
    pub feedback: Option<&'static str>,
    /// CSS modifier for the feedback line: "correct" or "incorrect".
    pub feedback_kind: Option<&'static str>,
    /// Wrong answers so far; the shell clears its input box whenever this changes.
    pub attempts: u32,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatchView {
    pub title: &'static str,
    pub time_left: u32,
    pub area_width: f32,
    pub area_height: f32,
    pub item_x: f32,
    pub item_y: f32,
    pub item_size: f32,
    pub catcher_x: f32,
    pub catcher_width: f32,
    pub active: bool,
    pub message: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrambleView {
    pub title: &'static str,
    pub time_left: u32,
    pub hint: String,
    pub tiles: Vec<char>,
    pub selected: Option<usize>,
    pub active: bool,
    pub message: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum ChallengeView {
    Arithmetic(ArithmeticView),
    Catch(CatchView),
    Scramble(ScrambleView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub kind: GameKind,
    pub time_remaining: u32,
    pub active: bool,
    pub outcome: Option<Outcome>,
    pub challenge: ChallengeView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameCard {
    pub kind: GameKind,
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreEntry {
    pub kind: GameKind,
    pub label: &'static str,
    pub points: u32,
    /// True while the "score updated" highlight is showing.
    pub updated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateView<C> {
    pub state: GateState,
    pub heading: Option<&'static str>,
    /// Label of the start button, shown only before a round.
    pub play_label: Option<&'static str>,
    pub notice: Option<&'static str>,
    pub attempts: u32,
    pub session: Option<SessionView>,
    pub content: C,
    pub content_visible: bool,
    /// Extra class for the content node, `None` until unlocked.
    pub content_marker: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcadeView {
    pub screen: Screen,
    /// "fade-out" / "fade-in" while a screen change is animating.
    pub transition: Option<&'static str>,
    pub cards: Vec<GameCard>,
    pub selected: Option<GameKind>,
    pub can_start: bool,
    pub session: Option<SessionView>,
    pub scores: Vec<ScoreEntry>,
    pub notice: Option<&'static str>,
}
