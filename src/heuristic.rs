//! Eye statistics used to order candidate moves.
//!
//! In NoGo an empty point whose on-board neighbors are all stones of one
//! color can never be played by the other side: it is a move held in
//! reserve for its owner. The evaluator counts these eyes, plus near eyes
//! (one empty neighbor away from an eye), for each color.
//!
//! The score only reorders moves in the solver. It never decides a win.

use crate::board::Color;
use crate::constants::{EMPTY, EYE_WEIGHT, NEAR_EYE_WEIGHT, STONE_BLACK, STONE_WHITE};
use crate::position::{Point, Position};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Feature {
    Eye,
    NearEye,
}

/// Heuristic score plus the per-color point lists needed to rescore a
/// child position incrementally.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalState {
    /// Score from the perspective of the color the state was computed for
    pub score: i32,
    pub black_near_eyes: Vec<Point>,
    pub white_near_eyes: Vec<Point>,
    pub black_eyes: Vec<Point>,
    pub white_eyes: Vec<Point>,
}

impl EvalState {
    /// The same statistics scored for the opponent.
    pub fn flipped(mut self) -> Self {
        self.score = -self.score;
        self
    }

    fn list_mut(&mut self, owner: Color, feature: Feature) -> &mut Vec<Point> {
        match (owner, feature) {
            (Color::Black, Feature::Eye) => &mut self.black_eyes,
            (Color::White, Feature::Eye) => &mut self.white_eyes,
            (Color::Black, Feature::NearEye) => &mut self.black_near_eyes,
            (Color::White, Feature::NearEye) => &mut self.white_near_eyes,
        }
    }

    /// Drop `pt` from whichever list holds it and report what it was.
    fn remove(&mut self, pt: Point) -> Option<(Color, Feature)> {
        for owner in [Color::Black, Color::White] {
            for feature in [Feature::Eye, Feature::NearEye] {
                let list = self.list_mut(owner, feature);
                if let Some(i) = list.iter().position(|&p| p == pt) {
                    list.swap_remove(i);
                    return Some((owner, feature));
                }
            }
        }
        None
    }
}

/// Classify an empty point by its orthogonal on-board neighbors.
fn classify(pos: &Position, pt: Point) -> Option<(Color, Feature)> {
    if pos.color[pt] != EMPTY {
        return None;
    }
    let (mut black, mut white, mut empty) = (0, 0, 0);
    for n in pos.neighbors(pt) {
        match pos.color[n] {
            STONE_BLACK => black += 1,
            STONE_WHITE => white += 1,
            EMPTY => empty += 1,
            _ => {}
        }
    }
    let owner = match (black, white) {
        (b, 0) if b > 0 => Color::Black,
        (0, w) if w > 0 => Color::White,
        _ => return None,
    };
    match empty {
        0 => Some((owner, Feature::Eye)),
        1 => Some((owner, Feature::NearEye)),
        _ => None,
    }
}

fn weight(owner: Color, feature: Feature, color: Color) -> i32 {
    let w = match feature {
        Feature::Eye => EYE_WEIGHT,
        Feature::NearEye => NEAR_EYE_WEIGHT,
    };
    if owner == color { w } else { -w }
}

/// Full evaluation of `pos` for `color`.
pub fn evaluate(pos: &Position, color: Color) -> EvalState {
    let mut state = EvalState::default();
    for pt in pos.empty_points() {
        if let Some((owner, feature)) = classify(pos, pt) {
            state.list_mut(owner, feature).push(pt);
            state.score += weight(owner, feature, color);
        }
    }
    state
}

/// Rescore after a single stone was placed at `last`.
///
/// `prior` must describe the position before `last` was placed and be
/// scored for `color`. Only `last` and its neighbors can change status, so
/// only those points are reclassified.
pub fn evaluate_incremental(
    pos: &Position,
    color: Color,
    last: Point,
    prior: &EvalState,
) -> EvalState {
    let mut state = prior.clone();
    let n = pos.neighbors(last);
    for pt in [last, n[0], n[1], n[2], n[3]] {
        if !pos.on_board(pt) {
            continue;
        }
        if let Some((owner, feature)) = state.remove(pt) {
            state.score -= weight(owner, feature, color);
        }
        if let Some((owner, feature)) = classify(pos, pt) {
            state.list_mut(owner, feature).push(pt);
            state.score += weight(owner, feature, color);
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setpos(size: usize, moves: &[(Color, &str)]) -> Position {
        let mut pos = Position::new(size);
        for &(color, mv) in moves {
            let pt = pos.parse_point(mv).unwrap();
            pos.place(pt, color);
        }
        pos
    }

    fn sorted(mut v: Vec<Point>) -> Vec<Point> {
        v.sort_unstable();
        v
    }

    #[test]
    fn test_empty_board_scores_zero() {
        let state = evaluate(&Position::new(5), Color::Black);
        assert_eq!(state, EvalState::default());
    }

    #[test]
    fn test_corner_eye() {
        let pos = setpos(3, &[(Color::Black, "a2"), (Color::Black, "b1")]);
        let a1 = pos.parse_point("a1").unwrap();
        let state = evaluate(&pos, Color::Black);
        assert_eq!(state.black_eyes, vec![a1]);
        assert!(state.white_eyes.is_empty());
        assert!(state.score >= EYE_WEIGHT);
        assert_eq!(evaluate(&pos, Color::White).score, -state.score);
    }

    #[test]
    fn test_near_eye() {
        let pos = setpos(3, &[(Color::White, "a2")]);
        let a1 = pos.parse_point("a1").unwrap();
        let a3 = pos.parse_point("a3").unwrap();
        let state = evaluate(&pos, Color::White);
        assert_eq!(sorted(state.white_near_eyes.clone()), sorted(vec![a1, a3]));
        assert_eq!(state.score, 2 * NEAR_EYE_WEIGHT);
    }

    #[test]
    fn test_mixed_neighbors_are_not_eyes() {
        let pos = setpos(3, &[(Color::White, "a2"), (Color::Black, "b1")]);
        let a1 = pos.parse_point("a1").unwrap();
        let state = evaluate(&pos, Color::Black);
        assert!(!state.black_eyes.contains(&a1));
        assert!(!state.white_eyes.contains(&a1));
    }

    #[test]
    fn test_incremental_matches_full() {
        let moves = [
            (Color::Black, "b2"),
            (Color::White, "d4"),
            (Color::Black, "a1"),
            (Color::Black, "c1"),
            (Color::White, "e5"),
            (Color::White, "d5"),
            (Color::Black, "b1"),
        ];
        let mut pos = Position::new(5);
        let mut state = evaluate(&pos, Color::Black);
        for (color, mv) in moves {
            let pt = pos.parse_point(mv).unwrap();
            pos.place(pt, color);
            state = evaluate_incremental(&pos, Color::Black, pt, &state);
            let full = evaluate(&pos, Color::Black);
            assert_eq!(state.score, full.score, "after {mv}");
            assert_eq!(sorted(state.black_eyes.clone()), sorted(full.black_eyes));
            assert_eq!(sorted(state.white_near_eyes.clone()), sorted(full.white_near_eyes));
        }
    }

    #[test]
    fn test_flipped_negates_score() {
        let pos = setpos(3, &[(Color::Black, "a2"), (Color::Black, "b1")]);
        let state = evaluate(&pos, Color::Black);
        let score = state.score;
        assert_eq!(state.flipped().score, -score);
    }
}
