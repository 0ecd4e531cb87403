use std::fmt;

use crate::generator::random::RandomSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
}

impl Operator {
    pub const ALL: [Operator; 3] = [Operator::Add, Operator::Subtract, Operator::Multiply];

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
        }
    }

    pub fn apply(self, a: i64, b: i64) -> i64 {
        match self {
            Operator::Add => a + b,
            // Negative results are valid answers.
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Question {
    pub operand_a: i64,
    pub operand_b: i64,
    pub operator: Operator,
    pub correct_answer: i64,
}

impl Question {
    pub fn new(operand_a: i64, operand_b: i64, operator: Operator) -> Self {
        Self {
            operand_a,
            operand_b,
            operator,
            correct_answer: operator.apply(operand_a, operand_b),
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.operand_a,
            self.operator.symbol(),
            self.operand_b
        )
    }
}

/// Exclusive upper bound for operands at the given difficulty level.
pub fn operand_bound(difficulty_level: u32) -> i64 {
    10 * i64::from(difficulty_level.max(1))
}

/// Draw two operands from `[1, 10 * level)` and a uniformly chosen operator.
pub fn generate<R: RandomSource>(rng: &mut R, difficulty_level: u32) -> Question {
    let upper = operand_bound(difficulty_level);
    let a = rng.next_int(1, upper);
    let b = rng.next_int(1, upper);
    let operator = rng
        .choose(&Operator::ALL)
        .copied()
        .unwrap_or(Operator::Add);
    Question::new(a, b, operator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::random::SeededRandom;
    use crate::generator::random::scripted::ScriptedRandom;

    #[test]
    fn test_operands_in_range_for_many_levels() {
        let mut rng = SeededRandom::from_seed(42);
        for level in 1..=12 {
            for _ in 0..300 {
                let q = generate(&mut rng, level);
                let upper = 10 * level as i64;
                assert!((1..upper).contains(&q.operand_a), "level {level}: {q}");
                assert!((1..upper).contains(&q.operand_b), "level {level}: {q}");
            }
        }
    }

    #[test]
    fn test_level_one_never_reaches_ten() {
        let mut rng = SeededRandom::from_seed(5);
        for _ in 0..1000 {
            let q = generate(&mut rng, 1);
            assert!(q.operand_a <= 9 && q.operand_b <= 9);
        }
    }

    #[test]
    fn test_answer_matches_operator_semantics() {
        let mut rng = SeededRandom::from_seed(11);
        for _ in 0..500 {
            let q = generate(&mut rng, 4);
            let expected = match q.operator {
                Operator::Add => q.operand_a + q.operand_b,
                Operator::Subtract => q.operand_a - q.operand_b,
                Operator::Multiply => q.operand_a * q.operand_b,
            };
            assert_eq!(q.correct_answer, expected);
        }
    }

    #[test]
    fn test_subtraction_can_go_negative() {
        // operands 2 and 7, operator index 1 (subtract)
        let mut rng = ScriptedRandom::new(&[2, 7, 1]);
        let q = generate(&mut rng, 1);
        assert_eq!(q.operator, Operator::Subtract);
        assert_eq!(q.correct_answer, -5);
        assert_eq!(q.to_string(), "2 - 7");
    }

    #[test]
    fn test_multiplication() {
        let mut rng = ScriptedRandom::new(&[6, 9, 2]);
        let q = generate(&mut rng, 1);
        assert_eq!(q.operator, Operator::Multiply);
        assert_eq!(q.correct_answer, 54);
    }

    #[test]
    fn test_all_operators_appear() {
        let mut rng = SeededRandom::from_seed(2024);
        let mut seen = Vec::new();
        for _ in 0..200 {
            let op = generate(&mut rng, 1).operator;
            if !seen.contains(&op) {
                seen.push(op);
            }
        }
        assert_eq!(seen.len(), 3);
    }
}
