//! `ClawMachine`: reach a prize with the fewest tokens.
//!
//! Each button moves the claw by a fixed non-negative `(dx, dy)` and costs
//! tokens. The search state is the press count per button, so presses in a
//! different order land on the same node. Moves that would carry the claw
//! past the prize on either axis are never generated.
//!
//! Two-button machines are solved in closed form: Cramer's rule when the
//! buttons are independent, a linear Diophantine solve when they move along
//! the same ray. Other machines are searched under an expansion budget.

use waypoint_search::contract::{Edge, SearchWorld};
use waypoint_search::policy::SearchPolicy;
use waypoint_search::search::{search, TerminationReason};

use crate::contract::ReferenceWorld;
use crate::error::HarnessError;

/// Press cap per button in the standard arcade.
pub const DEFAULT_MAX_PRESSES: i64 = 100;

/// Prize offset of the far-prize arcade.
pub const FAR_PRIZE_OFFSET: i64 = 10_000_000_000_000;

/// Expansion budget of the search fallback.
pub const DEFAULT_MAX_EXPANSIONS: u64 = 2_000_000;

/// Token cost of the `A` button when parsed from text.
pub const A_TOKENS: i64 = 3;
/// Token cost of the `B` button when parsed from text.
pub const B_TOKENS: i64 = 1;

/// One claw button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub id: char,
    pub dx: i64,
    pub dy: i64,
    pub tokens: i64,
}

/// Press counts that win the prize, and what they cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClawSolution {
    /// Presses per button, in button order.
    pub presses: Vec<i64>,
    pub tokens: i64,
}

/// A claw machine with its buttons and prize location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClawMachine {
    buttons: Vec<Button>,
    prize: (i64, i64),
    max_presses: Option<i64>,
    max_expansions: u64,
}

impl ClawMachine {
    /// Build a machine with the default press cap.
    ///
    /// # Errors
    ///
    /// - [`HarnessError::EmptyInput`] if there are no buttons.
    /// - [`HarnessError::InvalidParameter`] if a button has a negative
    ///   delta or token cost, does not move the claw at all, or the prize
    ///   lies at negative coordinates.
    pub fn new(buttons: Vec<Button>, prize: (i64, i64)) -> Result<Self, HarnessError> {
        if buttons.is_empty() {
            return Err(HarnessError::EmptyInput {
                detail: "claw machine has no buttons".into(),
            });
        }
        for b in &buttons {
            if b.dx < 0 || b.dy < 0 || b.tokens < 0 || (b.dx == 0 && b.dy == 0) {
                return Err(HarnessError::InvalidParameter {
                    detail: format!("button {:?} must move forward at a non-negative cost", b.id),
                });
            }
        }
        if prize.0 < 0 || prize.1 < 0 {
            return Err(HarnessError::InvalidParameter {
                detail: format!("prize {prize:?} lies behind the origin"),
            });
        }
        Ok(Self {
            buttons,
            prize,
            max_presses: Some(DEFAULT_MAX_PRESSES),
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        })
    }

    /// Replace the per-button press cap. `None` removes it.
    #[must_use]
    pub fn with_max_presses(mut self, max_presses: Option<i64>) -> Self {
        self.max_presses = max_presses;
        self
    }

    /// Replace the expansion budget of the search fallback. Zero is raised
    /// to one.
    #[must_use]
    pub fn with_max_expansions(mut self, max_expansions: u64) -> Self {
        self.max_expansions = max_expansions.max(1);
        self
    }

    /// Move the prize `offset` further along both axes.
    #[must_use]
    pub fn with_prize_offset(mut self, offset: i64) -> Self {
        self.prize = (
            self.prize.0.saturating_add(offset),
            self.prize.1.saturating_add(offset),
        );
        self
    }

    /// The far-prize variant: prize offset by [`FAR_PRIZE_OFFSET`], no cap.
    #[must_use]
    pub fn far_prize(self) -> Self {
        self.with_prize_offset(FAR_PRIZE_OFFSET).with_max_presses(None)
    }

    #[must_use]
    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    #[must_use]
    pub fn prize(&self) -> (i64, i64) {
        self.prize
    }

    /// Claw position after `presses`.
    #[must_use]
    pub fn position(&self, presses: &[i64]) -> (i64, i64) {
        self.buttons
            .iter()
            .zip(presses)
            .fold((0i64, 0i64), |(x, y), (b, &n)| {
                (
                    x.saturating_add(b.dx.saturating_mul(n)),
                    y.saturating_add(b.dy.saturating_mul(n)),
                )
            })
    }

    /// Cheapest way to win the prize, or `None` if it cannot be won.
    ///
    /// # Errors
    ///
    /// Same as [`ClawMachine::solve_by_search`], which only runs for
    /// machines without exactly two buttons.
    pub fn solve(&self) -> Result<Option<ClawSolution>, HarnessError> {
        match self.closed_form() {
            ClosedForm::Exact(solution) => Ok(solution),
            ClosedForm::Unavailable => self.solve_by_search(),
        }
    }

    /// Cheapest way to win the prize found by search alone.
    ///
    /// # Errors
    ///
    /// - [`HarnessError::SearchBudgetExhausted`] if the search ran out of
    ///   expansions before settling the question.
    /// - [`HarnessError::Search`] if the search rejected its policy.
    pub fn solve_by_search(&self) -> Result<Option<ClawSolution>, HarnessError> {
        let outcome = search(self, self.start(), &self.policy())?;
        if outcome.stats.termination == TerminationReason::ExpansionBudgetExceeded {
            return Err(HarnessError::SearchBudgetExhausted {
                world: "claw_machine",
                limit: self.max_expansions,
            });
        }
        Ok(outcome.path.and_then(|path| {
            Some(ClawSolution {
                tokens: path.cost(),
                presses: path.goal()?.clone(),
            })
        }))
    }

    fn closed_form(&self) -> ClosedForm {
        let [a, b] = self.buttons.as_slice() else {
            return ClosedForm::Unavailable;
        };
        let (px, py) = (i128::from(self.prize.0), i128::from(self.prize.1));
        let (ax, ay) = (i128::from(a.dx), i128::from(a.dy));
        let (bx, by) = (i128::from(b.dx), i128::from(b.dy));

        let det = ax * by - ay * bx;
        if det == 0 {
            return ClosedForm::Exact(self.collinear(a, b));
        }
        let na = px * by - py * bx;
        let nb = ax * py - ay * px;
        if na % det != 0 || nb % det != 0 {
            return ClosedForm::Exact(None);
        }
        let (Ok(pa), Ok(pb)) = (i64::try_from(na / det), i64::try_from(nb / det)) else {
            return ClosedForm::Exact(None);
        };
        if pa < 0 || pb < 0 || self.max_presses.is_some_and(|cap| pa > cap || pb > cap) {
            return ClosedForm::Exact(None);
        }
        let tokens = pa
            .checked_mul(a.tokens)
            .and_then(|t| pb.checked_mul(b.tokens).and_then(|u| t.checked_add(u)));
        ClosedForm::Exact(tokens.map(|tokens| ClawSolution {
            presses: vec![pa, pb],
            tokens,
        }))
    }

    /// Both buttons move along the same ray. Solve `ka * na + kb * nb = p`
    /// on an axis the ray moves along and take the cheapest solution with
    /// non-negative press counts within the cap. Ties go to fewer presses
    /// of the first button.
    fn collinear(&self, a: &Button, b: &Button) -> Option<ClawSolution> {
        let (px, py) = (i128::from(self.prize.0), i128::from(self.prize.1));
        if i128::from(a.dx) * py != i128::from(a.dy) * px {
            return None;
        }
        // Buttons never stand still, so both move along x or neither does.
        let (ka, kb, p) = if a.dx > 0 {
            (i128::from(a.dx), i128::from(b.dx), px)
        } else {
            (i128::from(a.dy), i128::from(b.dy), py)
        };

        let (g, x0, y0) = extended_gcd(ka, kb);
        if p % g != 0 {
            return None;
        }
        // General solution: na = a0 + t * step_a, nb = b0 - t * step_b.
        let (a0, b0) = (x0 * (p / g), y0 * (p / g));
        let (step_a, step_b) = (kb / g, ka / g);
        let mut lo = div_ceil(-a0, step_a);
        let mut hi = b0.div_euclid(step_b);
        if let Some(cap) = self.max_presses {
            let cap = i128::from(cap);
            hi = hi.min((cap - a0).div_euclid(step_a));
            lo = lo.max(div_ceil(b0 - cap, step_b));
        }
        if lo > hi {
            return None;
        }

        let (ta, tb) = (i128::from(a.tokens), i128::from(b.tokens));
        let t = if ta * step_a - tb * step_b < 0 { hi } else { lo };
        let (na, nb) = (a0 + t * step_a, b0 - t * step_b);
        Some(ClawSolution {
            presses: vec![i64::try_from(na).ok()?, i64::try_from(nb).ok()?],
            tokens: i64::try_from(ta * na + tb * nb).ok()?,
        })
    }

    /// Lower bound on tokens to cover `remaining` along one axis.
    fn axis_bound(&self, remaining: i64, delta: impl Fn(&Button) -> i64) -> i64 {
        if remaining <= 0 {
            return 0;
        }
        self.buttons
            .iter()
            .filter(|b| delta(b) > 0)
            .map(|b| i128::from(remaining) * i128::from(b.tokens) / i128::from(delta(b)))
            .min()
            .map_or(0, |bound| i64::try_from(bound).unwrap_or(i64::MAX))
    }
}

enum ClosedForm {
    /// Solved exactly; `None` if no legal press count wins.
    Exact(Option<ClawSolution>),
    /// Not a two-button machine.
    Unavailable,
}

/// `(g, x, y)` with `a * x + b * y = g = gcd(a, b)`.
fn extended_gcd(a: i128, b: i128) -> (i128, i128, i128) {
    let (mut old_r, mut r) = (a, b);
    let (mut old_s, mut s) = (1, 0);
    let (mut old_t, mut t) = (0, 1);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
        (old_t, t) = (t, old_t - q * t);
    }
    (old_r, old_s, old_t)
}

/// Ceiling division for a positive divisor.
fn div_ceil(n: i128, d: i128) -> i128 {
    -(-n).div_euclid(d)
}

impl SearchWorld for ClawMachine {
    type State = Vec<i64>;
    type Class = char;

    fn expand(&self, presses: &Self::State) -> Vec<Edge<Self::State, Self::Class>> {
        let (x, y) = self.position(presses);
        let mut edges = Vec::with_capacity(self.buttons.len());
        for (i, b) in self.buttons.iter().enumerate() {
            let count = presses.get(i).copied().unwrap_or(0);
            if self.max_presses.is_some_and(|cap| count >= cap) {
                continue;
            }
            if x.saturating_add(b.dx) > self.prize.0 || y.saturating_add(b.dy) > self.prize.1 {
                continue;
            }
            let mut next = presses.clone();
            if let Some(slot) = next.get_mut(i) {
                *slot += 1;
            }
            edges.push(Edge::new(next, b.tokens, b.id));
        }
        edges
    }

    fn is_goal(&self, presses: &Self::State) -> bool {
        self.position(presses) == self.prize
    }

    fn heuristic(&self, presses: &Self::State) -> i64 {
        let (x, y) = self.position(presses);
        let hx = self.axis_bound(self.prize.0 - x, |b| b.dx);
        let hy = self.axis_bound(self.prize.1 - y, |b| b.dy);
        hx.max(hy)
    }
}

impl ReferenceWorld for ClawMachine {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "claw_machine"
    }

    fn start(&self) -> Self::State {
        vec![0; self.buttons.len()]
    }

    fn policy(&self) -> SearchPolicy {
        SearchPolicy {
            max_expansions: Some(self.max_expansions),
            ..SearchPolicy::default()
        }
    }
}

/// Parse blocks of `Button A: X+94, Y+34` lines closed by a
/// `Prize: X=8400, Y=5400` line. Button `A` costs [`A_TOKENS`], every
/// other button [`B_TOKENS`].
///
/// # Errors
///
/// Returns [`HarnessError::MalformedLine`] for unrecognized lines or
/// numbers, and any [`ClawMachine::new`] error for a finished block.
pub fn parse_machines(text: &str) -> Result<Vec<ClawMachine>, HarnessError> {
    let mut machines = Vec::new();
    let mut buttons = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        let malformed = |detail: &str| HarnessError::MalformedLine {
            line: i + 1,
            detail: detail.to_string(),
        };
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix("Button ") {
            let (id, coords) = rest
                .split_once(':')
                .ok_or_else(|| malformed("expected `Button <id>: X+dx, Y+dy`"))?;
            let mut chars = id.chars();
            let (Some(id), None) = (chars.next(), chars.next()) else {
                return Err(malformed("button id must be one character"));
            };
            let (dx, dy) =
                parse_pair(coords, '+').ok_or_else(|| malformed("bad button offsets"))?;
            let tokens = if id == 'A' { A_TOKENS } else { B_TOKENS };
            buttons.push(Button { id, dx, dy, tokens });
        } else if let Some(rest) = line.strip_prefix("Prize:") {
            let prize = parse_pair(rest, '=').ok_or_else(|| malformed("bad prize position"))?;
            machines.push(ClawMachine::new(std::mem::take(&mut buttons), prize)?);
        } else {
            return Err(malformed("expected a `Button` or `Prize` line"));
        }
    }
    Ok(machines)
}

/// Parse `X<sep>a, Y<sep>b`.
fn parse_pair(text: &str, sep: char) -> Option<(i64, i64)> {
    let (x, y) = text.split_once(',')?;
    let x = x.trim().strip_prefix('X')?.strip_prefix(sep)?.parse().ok()?;
    let y = y.trim().strip_prefix('Y')?.strip_prefix(sep)?.parse().ok()?;
    Some((x, y))
}

/// Tokens spent winning every winnable prize.
///
/// # Errors
///
/// Propagates the first [`ClawMachine::solve`] failure.
pub fn total_tokens(machines: &[ClawMachine]) -> Result<i64, HarnessError> {
    let mut total = 0;
    for machine in machines {
        if let Some(solution) = machine.solve()? {
            total += solution.tokens;
        }
    }
    Ok(total)
}
