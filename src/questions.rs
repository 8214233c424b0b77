//! Random math question generation.
//!
//! Each topic is an independent, stateless template filler over
//! difficulty-scaled pools. Generation never fails past the public seam:
//! a calculus failure retries as algebra at the same difficulty, and any
//! failure of the dispatch itself degrades to a trivial addition question.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use tracing::{error, warn};

use crate::domain::{Difficulty, MathQuestion, Topic};
use crate::util::fmt_rounded;

const TOPICS: &[Topic] = &[Topic::Algebra, Topic::Geometry, Topic::Trigonometry, Topic::Calculus];
const DIFFICULTIES: &[Difficulty] = &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Shape { Square, Rectangle, Circle, Triangle }

const SHAPES: &[Shape] = &[Shape::Square, Shape::Rectangle, Shape::Circle, Shape::Triangle];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TrigFn { Sin, Cos, Tan }

const TRIG_FNS: &[TrigFn] = &[TrigFn::Sin, TrigFn::Cos, TrigFn::Tan];

impl TrigFn {
  fn name(self) -> &'static str {
    match self {
      TrigFn::Sin => "sin",
      TrigFn::Cos => "cos",
      TrigFn::Tan => "tan",
    }
  }

  fn eval_degrees(self, angle: u32) -> f64 {
    let radians = f64::from(angle).to_radians();
    match self {
      TrigFn::Sin => radians.sin(),
      TrigFn::Cos => radians.cos(),
      TrigFn::Tan => radians.tan(),
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CalcOp { Derivative, Integral }

const CALC_OPS: &[CalcOp] = &[CalcOp::Derivative, CalcOp::Integral];

const EASY_EXPRESSIONS: &[&str] = &["x^2", "x^3", "sin(x)", "cos(x)"];
const MEDIUM_EXPRESSIONS: &[&str] = &["x^2", "x^3", "sin(x)", "cos(x)", "e^x", "ln(x)"];
const HARD_EXPRESSIONS: &[&str] =
  &["x^2", "x^3", "sin(x)", "cos(x)", "e^x", "ln(x)", "tan(x)", "x^4", "sqrt(x)"];

fn expressions_for(difficulty: Difficulty) -> &'static [&'static str] {
  match difficulty {
    Difficulty::Easy => EASY_EXPRESSIONS,
    Difficulty::Medium => MEDIUM_EXPRESSIONS,
    Difficulty::Hard => HARD_EXPRESSIONS,
  }
}

fn angle_pool(difficulty: Difficulty) -> Vec<u32> {
  match difficulty {
    Difficulty::Easy => vec![0, 30, 45, 60, 90],
    Difficulty::Medium => vec![0, 30, 45, 60, 90, 120, 150, 180],
    Difficulty::Hard => (0..=360).step_by(15).collect(),
  }
}

fn algebra_range(difficulty: Difficulty) -> std::ops::RangeInclusive<u32> {
  match difficulty {
    Difficulty::Easy => 1..=5,
    _ => 1..=10,
  }
}

fn dimension_range(difficulty: Difficulty) -> std::ops::RangeInclusive<u32> {
  match difficulty {
    Difficulty::Easy => 1..=5,
    Difficulty::Medium => 5..=10,
    Difficulty::Hard => 10..=20,
  }
}

#[derive(Debug, Error)]
pub enum GenError {
  #[error("empty selection pool: {0}")]
  EmptyPool(&'static str),
}

/// Generate one practice question. Never fails visibly.
pub fn generate() -> MathQuestion {
  generate_with(&mut rand::thread_rng())
}

/// Same as [`generate`] but over a caller-supplied RNG.
pub fn generate_with<R: Rng>(rng: &mut R) -> MathQuestion {
  match try_generate(rng) {
    Ok(q) => q,
    Err(e) => {
      error!(target: "question", error = %e, "Question generation failed; using arithmetic fallback");
      arithmetic_fallback(rng)
    }
  }
}

fn try_generate<R: Rng>(rng: &mut R) -> Result<MathQuestion, GenError> {
  let topic = *TOPICS.choose(rng).ok_or(GenError::EmptyPool("topics"))?;
  let difficulty = *DIFFICULTIES.choose(rng).ok_or(GenError::EmptyPool("difficulties"))?;

  match topic {
    Topic::Algebra => Ok(algebra_question(difficulty, rng)),
    Topic::Geometry => geometry_question(difficulty, rng),
    Topic::Trigonometry => trigonometry_question(difficulty, rng),
    Topic::Calculus => calculus_or_fallback(difficulty, rng, expressions_for(difficulty)),
    Topic::Arithmetic => Ok(arithmetic_fallback(rng)),
  }
}

fn algebra_question<R: Rng>(difficulty: Difficulty, rng: &mut R) -> MathQuestion {
  let a = rng.gen_range(algebra_range(difficulty));
  let b = rng.gen_range(algebra_range(difficulty));
  let x = rng.gen_range(algebra_range(difficulty));
  let c = a * x + b;
  MathQuestion::new(
    format!("{}x + {} = {}", a, b, c),
    x.to_string(),
    Topic::Algebra,
    difficulty,
  )
}

fn geometry_question<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Result<MathQuestion, GenError> {
  let shape = *SHAPES.choose(rng).ok_or(GenError::EmptyPool("shapes"))?;
  let range = dimension_range(difficulty);
  let (question, answer) = match shape {
    Shape::Square => square_area(rng.gen_range(range)),
    Shape::Rectangle => rectangle_area(rng.gen_range(range.clone()), rng.gen_range(range)),
    Shape::Circle => circle_area(rng.gen_range(range)),
    Shape::Triangle => triangle_area(rng.gen_range(range.clone()), rng.gen_range(range)),
  };
  Ok(MathQuestion::new(question, answer, Topic::Geometry, difficulty))
}

fn square_area(side: u32) -> (String, String) {
  (
    format!("What is the area of a square with side length {}?", side),
    (side * side).to_string(),
  )
}

fn rectangle_area(length: u32, width: u32) -> (String, String) {
  (
    format!("What is the area of a rectangle with length {} and width {}?", length, width),
    (length * width).to_string(),
  )
}

fn circle_area(radius: u32) -> (String, String) {
  let area = std::f64::consts::PI * f64::from(radius) * f64::from(radius);
  (
    format!("What is the area of a circle with radius {}? (Round to 2 decimal places)", radius),
    fmt_rounded(area),
  )
}

fn triangle_area(base: u32, height: u32) -> (String, String) {
  let area = 0.5 * f64::from(base) * f64::from(height);
  (
    format!("What is the area of a triangle with base {} and height {}?", base, height),
    fmt_rounded(area),
  )
}

fn trigonometry_question<R: Rng>(
  difficulty: Difficulty,
  rng: &mut R,
) -> Result<MathQuestion, GenError> {
  let function = *TRIG_FNS.choose(rng).ok_or(GenError::EmptyPool("trig functions"))?;
  let angles = angle_pool(difficulty);
  let angle = *angles.choose(rng).ok_or(GenError::EmptyPool("angles"))?;
  Ok(MathQuestion::new(
    format!("What is the {} of {} degrees? (Round to 2 decimal places)", function.name(), angle),
    fmt_rounded(function.eval_degrees(angle)),
    Topic::Trigonometry,
    difficulty,
  ))
}

fn calculus_question<R: Rng>(
  difficulty: Difficulty,
  rng: &mut R,
  expressions: &[&str],
) -> Result<MathQuestion, GenError> {
  let op = *CALC_OPS.choose(rng).ok_or(GenError::EmptyPool("calculus operations"))?;
  let expr = *expressions.choose(rng).ok_or(GenError::EmptyPool("calculus expressions"))?;
  // The answer is an open-ended prompt label, not a computed symbolic result.
  let (question, answer) = match op {
    CalcOp::Derivative => (
      format!("What is the derivative of {} with respect to x?", expr),
      format!("Derivative of {}", expr),
    ),
    CalcOp::Integral => (
      format!(
        "What is the indefinite integral of {} with respect to x? (Ignore the constant of integration)",
        expr
      ),
      format!("Integral of {}", expr),
    ),
  };
  Ok(MathQuestion::new(question, answer, Topic::Calculus, difficulty))
}

fn calculus_or_fallback<R: Rng>(
  difficulty: Difficulty,
  rng: &mut R,
  expressions: &[&str],
) -> Result<MathQuestion, GenError> {
  match calculus_question(difficulty, rng, expressions) {
    Ok(q) => Ok(q),
    Err(e) => {
      warn!(target: "question", %difficulty, error = %e, "Calculus generation failed; falling back to algebra");
      Ok(algebra_question(difficulty, rng))
    }
  }
}

fn arithmetic_fallback<R: Rng>(rng: &mut R) -> MathQuestion {
  let a: u32 = rng.gen_range(1..=10);
  let b: u32 = rng.gen_range(1..=10);
  MathQuestion::new(
    format!("What is {} + {}?", a, b),
    (a + b).to_string(),
    Topic::Arithmetic,
    Difficulty::Easy,
  )
}
