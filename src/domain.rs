//! Domain models used by the backend: question topics/difficulties, the
//! generated question itself, and the persisted per-user progress record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Math subject area of a generated question.
/// `Arithmetic` never comes out of normal topic selection; it marks the
/// last-resort fallback question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
  Algebra,
  Geometry,
  Trigonometry,
  Calculus,
  Arithmetic,
}

impl fmt::Display for Topic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Topic::Algebra => "algebra",
      Topic::Geometry => "geometry",
      Topic::Trigonometry => "trigonometry",
      Topic::Calculus => "calculus",
      Topic::Arithmetic => "arithmetic",
    };
    f.write_str(s)
  }
}

/// Difficulty controls numeric ranges and the scoring weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}

impl Difficulty {
  /// Fixed difficulty -> points map.
  pub fn points(self) -> u32 {
    match self {
      Difficulty::Easy => 1,
      Difficulty::Medium => 2,
      Difficulty::Hard => 3,
    }
  }
}

impl fmt::Display for Difficulty {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Difficulty::Easy => "easy",
      Difficulty::Medium => "medium",
      Difficulty::Hard => "hard",
    };
    f.write_str(s)
  }
}

/// A generated practice question. Built per request, never stored.
#[derive(Clone, Debug, Serialize)]
pub struct MathQuestion {
  pub question: String,
  pub answer: String,
  pub topic: Topic,
  pub difficulty: Difficulty,
  pub points: u32,
}

impl MathQuestion {
  /// `points` is derived from `difficulty` here and nowhere else.
  pub fn new(question: String, answer: String, topic: Topic, difficulty: Difficulty) -> Self {
    Self {
      question,
      answer,
      topic,
      difficulty,
      points: difficulty.points(),
    }
  }
}

/// Persisted per-user progress. One record per user, fully overwritten on save.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
  pub user_id: String,
  pub level: u32,
  pub score: u32,
  pub completed_tasks: Vec<String>,
}

impl UserProgress {
  /// Record synthesized for users that have never saved anything.
  pub fn default_for(user_id: &str) -> Self {
    Self {
      user_id: user_id.to_string(),
      level: 1,
      score: 0,
      completed_tasks: Vec::new(),
    }
  }
}
