//! Quick math challenge: answer one arithmetic problem before the countdown ends.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::api::challenge::Challenge;
use crate::api::config::{ArithmeticSettings, RetryPolicy};
use crate::api::types::{GameKind, Outcome};
use crate::bridge::view::{ArithmeticView, ChallengeView};
use crate::core::clock::{ClockEvent, SessionClock, TaskId};
use crate::core::rng::Rng;
use crate::input::queue::{InputEvent, InputQueue};

const TITLE: &str = "Quick Math Challenge!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '−',
            Operator::Multiply => '×',
            Operator::Divide => '÷',
        }
    }
}

/// One problem and its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub left: i32,
    pub right: i32,
    pub op: Operator,
    pub answer: i32,
}

impl Problem {
    /// Draw a problem. Subtraction never goes negative and division is always exact.
    pub fn generate(rng: &mut Rng) -> Self {
        let op = Operator::ALL[rng.next_int(Operator::ALL.len() as u32) as usize];
        Self::generate_with(rng, op)
    }

    pub fn generate_with(rng: &mut Rng, op: Operator) -> Self {
        match op {
            Operator::Add => {
                let (left, right) = (rng.range_inclusive(1, 10), rng.range_inclusive(1, 10));
                Self { left, right, op, answer: left + right }
            }
            Operator::Subtract => {
                let (a, b) = (rng.range_inclusive(1, 10), rng.range_inclusive(1, 10));
                let (left, right) = if a < b { (b, a) } else { (a, b) };
                Self { left, right, op, answer: left - right }
            }
            // 2–10 keeps ×1 and ÷1 out of the pool.
            Operator::Multiply => {
                let (left, right) = (rng.range_inclusive(2, 10), rng.range_inclusive(2, 10));
                Self { left, right, op, answer: left * right }
            }
            Operator::Divide => {
                let quotient = rng.range_inclusive(2, 10);
                let divisor = rng.range_inclusive(2, 10);
                Self {
                    left: quotient * divisor,
                    right: divisor,
                    op,
                    answer: quotient,
                }
            }
        }
    }

    /// True if `input` parses as an integer equal to the answer.
    pub fn is_answered_by(&self, input: &str) -> bool {
        input.trim().parse::<i64>().ok() == Some(self.answer as i64)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} = ?", self.left, self.op.symbol(), self.right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Feedback {
    Correct,
    Incorrect,
    TimeUp,
}

impl Feedback {
    fn message(self) -> &'static str {
        match self {
            Feedback::Correct => "Correct!",
            Feedback::Incorrect => "Incorrect! Try again.",
            Feedback::TimeUp => "Time's up!",
        }
    }

    fn css(self) -> &'static str {
        match self {
            Feedback::Correct => "correct",
            Feedback::Incorrect | Feedback::TimeUp => "incorrect",
        }
    }
}

pub struct ArithmeticChallenge {
    retry_policy: RetryPolicy,
    feedback_for: Duration,
    rng: Rng,
    problem: Problem,
    clock: SessionClock,
    feedback: Option<Feedback>,
    feedback_task: Option<TaskId>,
    attempts: u32,
    active: bool,
}

impl ArithmeticChallenge {
    pub fn new(settings: &ArithmeticSettings, duration_secs: u32, mut rng: Rng) -> Self {
        let problem = Problem::generate(&mut rng);
        Self {
            retry_policy: settings.retry_policy,
            feedback_for: Duration::from_millis(settings.feedback_ms),
            rng,
            problem,
            clock: SessionClock::new(duration_secs),
            feedback: None,
            feedback_task: None,
            attempts: 0,
            active: true,
        }
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// Wrong answers submitted so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn feedback(&self) -> Option<&'static str> {
        self.feedback.map(Feedback::message)
    }

    /// Check an answer. Blank input is ignored; anything else that is not the
    /// answer (including non-numbers) counts as a wrong try.
    pub fn submit(&mut self, text: &str) -> Option<Outcome> {
        if !self.active || text.trim().is_empty() {
            return None;
        }
        if self.problem.is_answered_by(text) {
            return Some(self.finish(Outcome::Won, Feedback::Correct));
        }

        self.attempts += 1;
        log::debug!(
            "math: wrong answer {:?} to {} (attempt {})",
            text.trim(),
            self.problem,
            self.attempts
        );
        self.feedback = Some(Feedback::Incorrect);
        if let Some(task) = self.feedback_task.take() {
            self.clock.cancel_task(task);
        }
        self.feedback_task = Some(self.clock.every(self.feedback_for));
        if self.retry_policy == RetryPolicy::Regenerate {
            self.problem = Problem::generate(&mut self.rng);
        }
        None
    }

    fn finish(&mut self, outcome: Outcome, feedback: Feedback) -> Outcome {
        self.active = false;
        self.clock.cancel();
        self.feedback_task = None;
        self.feedback = Some(feedback);
        log::info!("math: {:?} on {}", outcome, self.problem);
        outcome
    }
}

impl Challenge for ArithmeticChallenge {
    fn kind(&self) -> GameKind {
        GameKind::Arithmetic
    }

    fn update(&mut self, dt: Duration, input: &InputQueue) -> Option<Outcome> {
        if !self.active {
            return None;
        }
        for event in input.iter() {
            if let InputEvent::Submit { text } = event {
                if let Some(outcome) = self.submit(text) {
                    return Some(outcome);
                }
            }
        }

        self.clock.advance(dt);
        while let Some(event) = self.clock.poll() {
            match event {
                ClockEvent::Expired => return Some(self.finish(Outcome::Lost, Feedback::TimeUp)),
                ClockEvent::Task(task) if Some(task) == self.feedback_task => {
                    self.clock.cancel_task(task);
                    self.feedback_task = None;
                    self.feedback = None;
                }
                _ => {}
            }
        }
        None
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn clock(&self) -> &SessionClock {
        &self.clock
    }

    fn abort(&mut self) {
        self.active = false;
        self.clock.cancel();
        self.feedback_task = None;
    }

    fn view(&self) -> ChallengeView {
        let time_left = self.clock.time_remaining();
        let duration = self.clock.duration();
        ChallengeView::Arithmetic(ArithmeticView {
            title: TITLE,
            question: self.problem.to_string(),
            time_left,
            duration,
            timer_percent: time_left as f32 / duration as f32 * 100.0,
            feedback: self.feedback.map(Feedback::message),
            feedback_kind: self.feedback.map(Feedback::css),
            attempts: self.attempts,
            active: self.active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn challenge(policy: RetryPolicy, duration: u32, seed: u64) -> ArithmeticChallenge {
        let settings = ArithmeticSettings {
            duration_secs: duration,
            retry_policy: policy,
            feedback_ms: 1000,
        };
        ArithmeticChallenge::new(&settings, duration, Rng::new(seed))
    }

    fn submit(text: &str) -> InputQueue {
        InputQueue::from_events([InputEvent::Submit { text: text.into() }])
    }

    /// A wrong answer that is still a number.
    fn wrong(problem: &Problem) -> String {
        (problem.answer + 1).to_string()
    }

    #[test]
    fn division_is_always_exact() {
        let mut rng = Rng::new(1234);
        for _ in 0..2000 {
            let p = Problem::generate_with(&mut rng, Operator::Divide);
            assert_eq!(p.answer * p.right, p.left, "{p}");
            assert!((2..=10).contains(&p.answer) && (2..=10).contains(&p.right));
        }
    }

    #[test]
    fn subtraction_is_never_negative() {
        let mut rng = Rng::new(5678);
        for _ in 0..2000 {
            let p = Problem::generate_with(&mut rng, Operator::Subtract);
            assert!(p.answer >= 0, "{p}");
            assert_eq!(p.left - p.right, p.answer);
        }
    }

    #[test]
    fn operands_stay_in_range() {
        let mut rng = Rng::new(9);
        for _ in 0..2000 {
            let p = Problem::generate(&mut rng);
            match p.op {
                Operator::Add | Operator::Subtract => {
                    assert!((1..=10).contains(&p.left) && (1..=10).contains(&p.right));
                }
                Operator::Multiply => {
                    assert!((2..=10).contains(&p.left) && (2..=10).contains(&p.right));
                    assert_eq!(p.left * p.right, p.answer);
                }
                Operator::Divide => assert_eq!(p.left % p.right, 0),
            }
        }
    }

    #[test]
    fn every_operator_shows_up() {
        let mut rng = Rng::new(77);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let op = Problem::generate(&mut rng).op;
            seen[Operator::ALL.iter().position(|o| *o == op).unwrap()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn question_format() {
        let p = Problem { left: 12, right: 4, op: Operator::Divide, answer: 3 };
        assert_eq!(p.to_string(), "12 ÷ 4 = ?");
        assert!(p.is_answered_by(" 3 "));
        assert!(!p.is_answered_by("three"));
    }

    #[test]
    fn correct_answer_wins_and_stops_timers() {
        let mut game = challenge(RetryPolicy::Keep, 10, 3);
        let answer = game.problem().answer.to_string();
        let outcome = game.update(Duration::ZERO, &submit(&answer));
        assert_eq!(outcome, Some(Outcome::Won));
        assert!(!game.is_active());
        assert!(!game.timers_running());
        assert_eq!(game.feedback(), Some("Correct!"));
        // Terminal state is entered once.
        assert_eq!(game.update(Duration::from_secs(20), &submit(&answer)), None);
    }

    #[test]
    fn keep_policy_keeps_problem_after_wrong_answer() {
        let mut game = challenge(RetryPolicy::Keep, 10, 11);
        let before = *game.problem();
        assert_eq!(game.update(Duration::ZERO, &submit(&wrong(&before))), None);
        assert_eq!(*game.problem(), before);
        assert_eq!(game.attempts(), 1);
        assert_eq!(game.feedback(), Some("Incorrect! Try again."));
        assert!(game.is_active());
    }

    #[test]
    fn regenerate_policy_draws_a_new_problem() {
        let mut game = challenge(RetryPolicy::Regenerate, 10, 11);
        let mut rng = Rng::new(11);
        let first = Problem::generate(&mut rng);
        let second = Problem::generate(&mut rng);
        assert_eq!(*game.problem(), first);
        game.submit(&wrong(&first));
        assert_eq!(*game.problem(), second);
    }

    #[test]
    fn non_numeric_answer_is_recovered() {
        let mut game = challenge(RetryPolicy::Keep, 10, 5);
        assert_eq!(game.update(Duration::ZERO, &submit("abc")), None);
        assert!(game.is_active());
        assert_eq!(game.attempts(), 1);
        let answer = game.problem().answer.to_string();
        assert_eq!(game.update(Duration::ZERO, &submit(&answer)), Some(Outcome::Won));
    }

    #[test]
    fn blank_answer_is_ignored() {
        let mut game = challenge(RetryPolicy::Keep, 10, 5);
        assert_eq!(game.update(Duration::ZERO, &submit("   ")), None);
        assert_eq!(game.attempts(), 0);
        assert_eq!(game.feedback(), None);
    }

    #[test]
    fn incorrect_feedback_clears_after_a_second() {
        let mut game = challenge(RetryPolicy::Keep, 10, 8);
        let p = *game.problem();
        game.update(Duration::ZERO, &submit(&wrong(&p)));
        game.update(Duration::from_millis(999), &InputQueue::new());
        assert!(game.feedback().is_some());
        game.update(Duration::from_millis(1), &InputQueue::new());
        assert_eq!(game.feedback(), None);
        // The clear task is one-shot; only the countdown is left.
        assert_eq!(game.time_remaining(), 9);
    }

    #[test]
    fn expiry_loses_exactly_once() {
        let mut game = challenge(RetryPolicy::Keep, 5, 2);
        let empty = InputQueue::new();
        let mut outcomes = Vec::new();
        for second in 1..=8 {
            if let Some(o) = game.update(Duration::from_secs(1), &empty) {
                outcomes.push((second, o));
            }
        }
        assert_eq!(outcomes, vec![(5, Outcome::Lost)]);
        assert_eq!(game.feedback(), Some("Time's up!"));
        assert!(!game.timers_running());
    }

    #[test]
    fn abort_cancels_without_outcome() {
        let mut game = challenge(RetryPolicy::Keep, 5, 2);
        game.abort();
        assert!(!game.is_active());
        assert!(!game.timers_running());
        assert_eq!(game.update(Duration::from_secs(10), &InputQueue::new()), None);
    }

    #[test]
    fn view_reports_timer_bar() {
        let mut game = challenge(RetryPolicy::Keep, 10, 2);
        game.update(Duration::from_secs(3), &InputQueue::new());
        match game.view() {
            ChallengeView::Arithmetic(view) => {
                assert_eq!(view.time_left, 7);
                assert!((view.timer_percent - 70.0).abs() < 1e-3);
                assert_eq!(view.title, TITLE);
            }
            other => panic!("unexpected view {other:?}"),
        }
    }
}
