//! Strategy definitions and execution

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DilemmaError, Result};
use crate::history::{Choice, HistoryLog, Seat, SeatView};
use crate::payoff::PayoffTable;
use crate::random::SeededRng;

const DEFAULT_COOPERATION_PROBABILITY: f64 = 0.6;
const DEFAULT_MIRROR_PROBABILITY: f64 = 0.9;
const FORGIVENESS_PROBABILITY: f64 = 0.5;
/// Rounds of forced defection after each opponent defection (Two Tits for Tat)
const RETALIATION_ROUNDS: u8 = 2;

/// Cooperation probabilities keyed by last round's (own, opponent) choices
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemoryOneParams {
    /// After (D, D); also used for the opening move
    pub p: f64,
    /// After (D, C): we defected, opponent cooperated
    pub q: f64,
    /// After (C, D): we cooperated, opponent defected
    pub r: f64,
    /// After (C, C)
    pub s: f64,
}

impl Default for MemoryOneParams {
    fn default() -> Self {
        Self { p: 0.8, q: 0.4, r: 0.7, s: 0.5 }
    }
}

/// Reactive strategy: opening probability plus responses to the opponent
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReactiveParams {
    /// Probability of cooperating in round 0
    pub y: f64,
    /// Probability of cooperating after the opponent defected
    pub p: f64,
    /// Probability of cooperating after the opponent cooperated
    pub q: f64,
}

impl Default for ReactiveParams {
    fn default() -> Self {
        Self { y: 0.55, p: 0.7, q: 0.4 }
    }
}

/// Strategy variant with its configuration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Always cooperate, never defect.
    AlwaysCooperate,
    /// Always defect, never cooperate.
    AlwaysDefect,
    /// Fair coin flip each round.
    Random,
    /// Cooperate with a fixed probability, ignoring history.
    ProbabilisticCooperator { probability: f64 },
    /// Copy opponent's last move. Start with cooperate.
    TitForTat,
    /// Tit-for-Tat but start with defect.
    SuspiciousTitForTat,
    /// Defect only if opponent defected twice in a row.
    TitForTwoTats,
    /// Cooperate until opponent defects once, then always defect.
    GrimTrigger,
    /// Tit-for-Tat that forgives a defection half of the time.
    TitForTatWithForgiveness,
    /// Tit-for-Tat that only mirrors with the given probability.
    ImperfectTitForTat { mirror_probability: f64 },
    /// Each opponent defection is answered with two defections.
    TwoTitsForTat,
    /// Win-stay, lose-shift.
    Pavlov,
    MemoryOne(MemoryOneParams),
    Reactive(ReactiveParams),
    /// Zero-determinant equalizer pinning the opponent's average score.
    Equalizer { target: f64 },
}

impl StrategyKind {
    /// Every variant with default parameters
    pub fn catalog() -> Vec<StrategyKind> {
        vec![
            StrategyKind::AlwaysCooperate,
            StrategyKind::AlwaysDefect,
            StrategyKind::Random,
            StrategyKind::ProbabilisticCooperator { probability: DEFAULT_COOPERATION_PROBABILITY },
            StrategyKind::TitForTat,
            StrategyKind::SuspiciousTitForTat,
            StrategyKind::TitForTwoTats,
            StrategyKind::GrimTrigger,
            StrategyKind::TitForTatWithForgiveness,
            StrategyKind::ImperfectTitForTat { mirror_probability: DEFAULT_MIRROR_PROBABILITY },
            StrategyKind::TwoTitsForTat,
            StrategyKind::Pavlov,
            StrategyKind::MemoryOne(MemoryOneParams::default()),
            StrategyKind::Reactive(ReactiveParams::default()),
            StrategyKind::Equalizer { target: default_target(&PayoffTable::CANONICAL) },
        ]
    }

    /// Identifier accepted by `FromStr`
    pub fn id(&self) -> &'static str {
        match self {
            StrategyKind::AlwaysCooperate => "AlwaysCooperate",
            StrategyKind::AlwaysDefect => "AlwaysDefect",
            StrategyKind::Random => "Random",
            StrategyKind::ProbabilisticCooperator { .. } => "ProbabilisticCooperator",
            StrategyKind::TitForTat => "TitForTat",
            StrategyKind::SuspiciousTitForTat => "SuspiciousTitForTat",
            StrategyKind::TitForTwoTats => "TitForTwoTats",
            StrategyKind::GrimTrigger => "GrimTrigger",
            StrategyKind::TitForTatWithForgiveness => "TitForTatWithForgiveness",
            StrategyKind::ImperfectTitForTat { .. } => "ImperfectTitForTat",
            StrategyKind::TwoTitsForTat => "TwoTitsForTat",
            StrategyKind::Pavlov => "Pavlov",
            StrategyKind::MemoryOne(_) => "MemoryOne",
            StrategyKind::Reactive(_) => "Reactive",
            StrategyKind::Equalizer { .. } => "Equalizer",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::AlwaysCooperate => "Always Cooperate",
            StrategyKind::AlwaysDefect => "Always Defect",
            StrategyKind::Random => "Random",
            StrategyKind::ProbabilisticCooperator { .. } => "Probabilistic Cooperator",
            StrategyKind::TitForTat => "Tit for Tat",
            StrategyKind::SuspiciousTitForTat => "Suspicious Tit for Tat",
            StrategyKind::TitForTwoTats => "Tit for Two Tats",
            StrategyKind::GrimTrigger => "Grim Trigger",
            StrategyKind::TitForTatWithForgiveness => "Tit for Tat with Forgiveness",
            StrategyKind::ImperfectTitForTat { .. } => "Imperfect Tit for Tat",
            StrategyKind::TwoTitsForTat => "Two Tits for Tat",
            StrategyKind::Pavlov => "Pavlov",
            StrategyKind::MemoryOne(_) => "Memory-one",
            StrategyKind::Reactive(_) => "Reactive",
            StrategyKind::Equalizer { .. } => "Zero-determinant Equalizer",
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            StrategyKind::AlwaysCooperate => "CU",
            StrategyKind::AlwaysDefect => "DU",
            StrategyKind::Random => "RND",
            StrategyKind::ProbabilisticCooperator { .. } => "PC",
            StrategyKind::TitForTat => "TFT",
            StrategyKind::SuspiciousTitForTat => "STFT",
            StrategyKind::TitForTwoTats => "TFTT",
            StrategyKind::GrimTrigger => "GT",
            StrategyKind::TitForTatWithForgiveness => "TFTF",
            StrategyKind::ImperfectTitForTat { .. } => "ITFT",
            StrategyKind::TwoTitsForTat => "TTFT",
            StrategyKind::Pavlov => "WSLS",
            StrategyKind::MemoryOne(_) => "S(p,q,r,s)",
            StrategyKind::Reactive(_) => "R(y,p,q)",
            StrategyKind::Equalizer { .. } => "ZD",
        }
    }

    /// Human-readable description of the decision rule
    pub fn describe(&self) -> String {
        match self {
            StrategyKind::AlwaysCooperate => "Never defects. Always cooperates.".to_string(),
            StrategyKind::AlwaysDefect => "Never cooperates. Always defects.".to_string(),
            StrategyKind::Random => "Cooperates or defects with equal odds each round.".to_string(),
            StrategyKind::ProbabilisticCooperator { probability } => {
                format!("Cooperates with probability {} regardless of history.", probability)
            }
            StrategyKind::TitForTat => "Copies opponent's last move. Starts by cooperating.".to_string(),
            StrategyKind::SuspiciousTitForTat => "Like Tit for Tat, but starts with defect.".to_string(),
            StrategyKind::TitForTwoTats => {
                "Only retaliates after two consecutive defections.".to_string()
            }
            StrategyKind::GrimTrigger => "Cooperates until betrayed, then always defects.".to_string(),
            StrategyKind::TitForTatWithForgiveness => {
                "Like Tit for Tat, but forgives a defection half of the time.".to_string()
            }
            StrategyKind::ImperfectTitForTat { mirror_probability } => format!(
                "Copies opponent's last move with probability {}, otherwise does the opposite.",
                mirror_probability
            ),
            StrategyKind::TwoTitsForTat => {
                "Answers every defection with two rounds of defection.".to_string()
            }
            StrategyKind::Pavlov => {
                "Cooperates when both players made the same move last round, otherwise defects."
                    .to_string()
            }
            StrategyKind::MemoryOne(m) => format!(
                "Cooperates with probability {}/{}/{}/{} after (D,D)/(D,C)/(C,D)/(C,C).",
                m.p, m.q, m.r, m.s
            ),
            StrategyKind::Reactive(r) => format!(
                "Opens cooperating with probability {}, then {} after a defection and {} after cooperation.",
                r.y, r.p, r.q
            ),
            StrategyKind::Equalizer { target } => format!(
                "Steers the opponent's average score per round towards {}.",
                target
            ),
        }
    }

    /// Replace out-of-range parameters with their documented defaults
    pub fn normalized(self) -> Self {
        match self {
            StrategyKind::ProbabilisticCooperator { probability } => {
                StrategyKind::ProbabilisticCooperator {
                    probability: probability_or(
                        probability,
                        DEFAULT_COOPERATION_PROBABILITY,
                        "ProbabilisticCooperator.probability",
                    ),
                }
            }
            StrategyKind::ImperfectTitForTat { mirror_probability } => {
                let mirror_probability = if mirror_probability > 0.0 && mirror_probability < 1.0 {
                    mirror_probability
                } else {
                    tracing::warn!(
                        parameter = "ImperfectTitForTat.mirror_probability",
                        value = mirror_probability,
                        default = DEFAULT_MIRROR_PROBABILITY,
                        "probability outside (0, 1), using default"
                    );
                    DEFAULT_MIRROR_PROBABILITY
                };
                StrategyKind::ImperfectTitForTat { mirror_probability }
            }
            StrategyKind::MemoryOne(m) => {
                let d = MemoryOneParams::default();
                StrategyKind::MemoryOne(MemoryOneParams {
                    p: probability_or(m.p, d.p, "MemoryOne.p"),
                    q: probability_or(m.q, d.q, "MemoryOne.q"),
                    r: probability_or(m.r, d.r, "MemoryOne.r"),
                    s: probability_or(m.s, d.s, "MemoryOne.s"),
                })
            }
            StrategyKind::Reactive(r) => {
                let d = ReactiveParams::default();
                StrategyKind::Reactive(ReactiveParams {
                    y: probability_or(r.y, d.y, "Reactive.y"),
                    p: probability_or(r.p, d.p, "Reactive.p"),
                    q: probability_or(r.q, d.q, "Reactive.q"),
                })
            }
            other => other,
        }
    }
}

/// Accept `value` when it is a probability in [0, 1], otherwise fall back
fn probability_or(value: f64, default: f64, parameter: &str) -> f64 {
    if (0.0..=1.0).contains(&value) {
        value
    } else {
        tracing::warn!(parameter, value, default, "probability outside [0, 1], using default");
        default
    }
}

/// Midpoint of the punishment..reward band
fn default_target(payoffs: &PayoffTable) -> f64 {
    (payoffs.punishment as f64 + payoffs.reward as f64) / 2.0
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::ProbabilisticCooperator { probability } => {
                write!(f, "{}({})", self.id(), probability)
            }
            StrategyKind::ImperfectTitForTat { mirror_probability } => {
                write!(f, "{}({})", self.id(), mirror_probability)
            }
            StrategyKind::MemoryOne(m) => {
                write!(f, "{}({},{},{},{})", self.id(), m.p, m.q, m.r, m.s)
            }
            StrategyKind::Reactive(r) => write!(f, "{}({},{},{})", self.id(), r.y, r.p, r.q),
            StrategyKind::Equalizer { target } => write!(f, "{}({})", self.id(), target),
            _ => f.write_str(self.id()),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = DilemmaError;

    /// Parse a name or abbreviation with optional parameters,
    /// e.g. `tft`, `Grim Trigger`, `MemoryOne(1,1,1,1)`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (name, args) = match s.find('(') {
            Some(open) => {
                let inner = s[open + 1..]
                    .strip_suffix(')')
                    .ok_or_else(|| DilemmaError::InvalidStrategyArgs(format!("missing ')' in {}", s)))?;
                (&s[..open], parse_args(inner)?)
            }
            None => (s, Vec::new()),
        };

        let key: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        let kind = match key.as_str() {
            "alwayscooperate" | "cooperateunconditionally" | "cu" | "allc" => {
                no_args(StrategyKind::AlwaysCooperate, &args)?
            }
            "alwaysdefect" | "defectunconditionally" | "du" | "alld" => {
                no_args(StrategyKind::AlwaysDefect, &args)?
            }
            "random" | "rnd" => no_args(StrategyKind::Random, &args)?,
            "probabilisticcooperator" | "probabilitycooperator" | "pc" => {
                let [probability] = fixed_args(&args, [DEFAULT_COOPERATION_PROBABILITY])?;
                StrategyKind::ProbabilisticCooperator { probability }
            }
            "titfortat" | "tft" => no_args(StrategyKind::TitForTat, &args)?,
            "suspicioustitfortat" | "stft" => no_args(StrategyKind::SuspiciousTitForTat, &args)?,
            "titfortwotats" | "tftt" => no_args(StrategyKind::TitForTwoTats, &args)?,
            "grimtrigger" | "grim" | "gt" => no_args(StrategyKind::GrimTrigger, &args)?,
            "titfortatwithforgiveness" | "forgivingtitfortat" | "tftf" => {
                no_args(StrategyKind::TitForTatWithForgiveness, &args)?
            }
            "imperfecttitfortat" | "itft" => {
                let [mirror_probability] = fixed_args(&args, [DEFAULT_MIRROR_PROBABILITY])?;
                StrategyKind::ImperfectTitForTat { mirror_probability }
            }
            "twotitsfortat" | "ttft" => no_args(StrategyKind::TwoTitsForTat, &args)?,
            "pavlov" | "wsls" | "winstayloseshift" => no_args(StrategyKind::Pavlov, &args)?,
            "memoryone" | "memory1" | "s" => {
                let d = MemoryOneParams::default();
                let [p, q, r, s] = fixed_args(&args, [d.p, d.q, d.r, d.s])?;
                StrategyKind::MemoryOne(MemoryOneParams { p, q, r, s })
            }
            "reactive" | "r" => {
                let d = ReactiveParams::default();
                let [y, p, q] = fixed_args(&args, [d.y, d.p, d.q])?;
                StrategyKind::Reactive(ReactiveParams { y, p, q })
            }
            "equalizer" | "zerodeterminant" | "zd" | "eq" => {
                let [target] = fixed_args(&args, [default_target(&PayoffTable::CANONICAL)])?;
                StrategyKind::Equalizer { target }
            }
            _ => return Err(DilemmaError::UnknownStrategy(name.trim().to_string())),
        };

        Ok(kind)
    }
}

fn parse_args(inner: &str) -> Result<Vec<f64>> {
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    inner
        .split(',')
        .map(|a| {
            a.trim()
                .parse::<f64>()
                .map_err(|_| DilemmaError::InvalidStrategyArgs(format!("not a number: {:?}", a.trim())))
        })
        .collect()
}

fn no_args(kind: StrategyKind, args: &[f64]) -> Result<StrategyKind> {
    if args.is_empty() {
        Ok(kind)
    } else {
        Err(DilemmaError::InvalidStrategyArgs(format!("{} takes no parameters", kind.id())))
    }
}

/// Either no arguments (use defaults) or exactly N
fn fixed_args<const N: usize>(args: &[f64], defaults: [f64; N]) -> Result<[f64; N]> {
    if args.is_empty() {
        return Ok(defaults);
    }
    <[f64; N]>::try_from(args).map_err(|_| {
        DilemmaError::InvalidStrategyArgs(format!("expected {} parameters, got {}", N, args.len()))
    })
}

/// Opponent outcome tallies for the equalizer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct OutcomeCounts {
    temptation: u32,
    reward: u32,
    punishment: u32,
    sucker: u32,
}

impl OutcomeCounts {
    /// Count one round from the opponent's side, given (own, opponent) choices
    fn record(&mut self, own: Choice, opponent: Choice) {
        match (own, opponent) {
            (Choice::Cooperate, Choice::Cooperate) => self.reward += 1,
            (Choice::Cooperate, Choice::Defect) => self.temptation += 1,
            (Choice::Defect, Choice::Cooperate) => self.sucker += 1,
            (Choice::Defect, Choice::Defect) => self.punishment += 1,
        }
    }

    fn score(&self, payoffs: &PayoffTable) -> f64 {
        self.temptation as f64 * payoffs.temptation as f64
            + self.reward as f64 * payoffs.reward as f64
            + self.punishment as f64 * payoffs.punishment as f64
            + self.sucker as f64 * payoffs.sucker as f64
    }
}

/// Private per-game state
#[derive(Clone, Copy, Debug, PartialEq)]
enum StrategyState {
    Stateless,
    Grim { triggered: bool },
    TwoTits { forced_defections: u8 },
    Equalizer { target: f64, counts: OutcomeCounts },
}

impl StrategyState {
    fn initial(kind: &StrategyKind, payoffs: &PayoffTable) -> Self {
        match kind {
            StrategyKind::GrimTrigger => StrategyState::Grim { triggered: false },
            StrategyKind::TwoTitsForTat => StrategyState::TwoTits { forced_defections: 0 },
            StrategyKind::Equalizer { target } => {
                let lo = payoffs.punishment as f64;
                let hi = payoffs.reward as f64;
                let target = if (lo..=hi).contains(target) {
                    *target
                } else {
                    let fallback = default_target(payoffs);
                    tracing::warn!(
                        parameter = "Equalizer.target",
                        value = *target,
                        default = fallback,
                        "target outside [punishment, reward], using default"
                    );
                    fallback
                };
                StrategyState::Equalizer { target, counts: OutcomeCounts::default() }
            }
            _ => StrategyState::Stateless,
        }
    }
}

/// A strategy instance playing one game from one seat
#[derive(Clone, Debug, PartialEq)]
pub struct Strategy {
    kind: StrategyKind,
    seat: Option<Seat>,
    payoffs: PayoffTable,
    state: StrategyState,
}

impl Strategy {
    /// Fresh, unseated instance. Out-of-range parameters are replaced by defaults.
    pub fn new(kind: StrategyKind) -> Self {
        let kind = kind.normalized();
        let payoffs = PayoffTable::CANONICAL;
        Self {
            kind,
            seat: None,
            payoffs,
            state: StrategyState::initial(&kind, &payoffs),
        }
    }

    /// Fresh instance already bound to `seat`
    pub fn seated(kind: StrategyKind, seat: Seat) -> Self {
        let mut strategy = Self::new(kind);
        strategy.seat = Some(seat);
        strategy
    }

    pub fn kind(&self) -> &StrategyKind {
        &self.kind
    }

    pub fn seat(&self) -> Option<Seat> {
        self.seat
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Bind to a seat and payoff table. Fails if already bound to the other seat.
    pub fn take_seat(&mut self, seat: Seat, payoffs: &PayoffTable) -> Result<()> {
        match self.seat {
            Some(current) if current != seat => return Err(DilemmaError::SeatConflict(current)),
            _ => self.seat = Some(seat),
        }
        if self.payoffs != *payoffs {
            self.payoffs = *payoffs;
            self.state = StrategyState::initial(&self.kind, &self.payoffs);
        }
        Ok(())
    }

    /// Drop per-game state so the instance can start another game
    pub fn reset(&mut self) {
        self.state = StrategyState::initial(&self.kind, &self.payoffs);
    }

    /// Choose a move for `round`, which must be the next unplayed round
    pub fn decide(&mut self, history: &HistoryLog, round: usize, rng: &mut SeededRng) -> Result<Choice> {
        if round != history.len() {
            return Err(DilemmaError::RoundMismatch { expected: history.len(), requested: round });
        }
        let seat = self.seat.ok_or(DilemmaError::InvalidState)?;
        let view = history.view(seat);

        match self.kind {
            StrategyKind::AlwaysCooperate => Ok(Choice::Cooperate),
            StrategyKind::AlwaysDefect => Ok(Choice::Defect),
            StrategyKind::Random => Ok(Choice::from_cooperation(rng.coin())),
            StrategyKind::ProbabilisticCooperator { probability } => {
                Ok(Choice::from_cooperation(rng.chance(probability)))
            }
            StrategyKind::TitForTat => mirror(&view, round, Choice::Cooperate),
            StrategyKind::SuspiciousTitForTat => mirror(&view, round, Choice::Defect),
            StrategyKind::TitForTwoTats => execute_tit_for_two_tats(&view, round),
            StrategyKind::GrimTrigger => execute_grim_trigger(&view, round, &mut self.state),
            StrategyKind::TitForTatWithForgiveness => execute_forgiving(&view, round, rng),
            StrategyKind::ImperfectTitForTat { mirror_probability } => {
                execute_imperfect(&view, round, mirror_probability, rng)
            }
            StrategyKind::TwoTitsForTat => execute_two_tits(&view, round, &mut self.state),
            StrategyKind::Pavlov => execute_pavlov(&view, round, rng),
            StrategyKind::MemoryOne(params) => execute_memory_one(&view, round, &params, rng),
            StrategyKind::Reactive(params) => execute_reactive(&view, round, &params, rng),
            StrategyKind::Equalizer { .. } => {
                execute_equalizer(&view, round, &self.payoffs, &mut self.state)
            }
        }
    }
}

/// Opponent's move in the previous round, `None` at round 0
fn opponent_last(view: &SeatView<'_>, round: usize) -> Result<Option<Choice>> {
    match round.checked_sub(1) {
        Some(prev) => view.opponent(prev).map(Some),
        None => Ok(None),
    }
}

/// Tit-for-Tat family: open with `opening`, then copy the opponent
fn mirror(view: &SeatView<'_>, round: usize, opening: Choice) -> Result<Choice> {
    Ok(opponent_last(view, round)?.unwrap_or(opening))
}

fn execute_tit_for_two_tats(view: &SeatView<'_>, round: usize) -> Result<Choice> {
    if round < 2 {
        return mirror(view, round, Choice::Cooperate);
    }
    let both_defected = view.opponent(round - 2)?.is_defect() && view.opponent(round - 1)?.is_defect();
    Ok(if both_defected { Choice::Defect } else { Choice::Cooperate })
}

fn execute_grim_trigger(view: &SeatView<'_>, round: usize, state: &mut StrategyState) -> Result<Choice> {
    let StrategyState::Grim { triggered } = state else {
        return Err(DilemmaError::InvalidState);
    };
    if !*triggered && opponent_last(view, round)? == Some(Choice::Defect) {
        *triggered = true;
    }
    Ok(if *triggered { Choice::Defect } else { Choice::Cooperate })
}

fn execute_forgiving(view: &SeatView<'_>, round: usize, rng: &mut SeededRng) -> Result<Choice> {
    match opponent_last(view, round)? {
        Some(Choice::Defect) => Ok(Choice::from_cooperation(rng.chance(FORGIVENESS_PROBABILITY))),
        _ => Ok(Choice::Cooperate),
    }
}

fn execute_imperfect(
    view: &SeatView<'_>,
    round: usize,
    mirror_probability: f64,
    rng: &mut SeededRng,
) -> Result<Choice> {
    match opponent_last(view, round)? {
        None => Ok(Choice::Cooperate),
        Some(last) if rng.chance(mirror_probability) => Ok(last),
        Some(last) => Ok(last.flipped()),
    }
}

fn execute_two_tits(view: &SeatView<'_>, round: usize, state: &mut StrategyState) -> Result<Choice> {
    let StrategyState::TwoTits { forced_defections } = state else {
        return Err(DilemmaError::InvalidState);
    };
    if opponent_last(view, round)? == Some(Choice::Defect) {
        *forced_defections = RETALIATION_ROUNDS;
    }
    if *forced_defections > 0 {
        *forced_defections -= 1;
        Ok(Choice::Defect)
    } else {
        Ok(Choice::Cooperate)
    }
}

/// Win-stay, lose-shift: cooperate iff both made the same move last round
fn execute_pavlov(view: &SeatView<'_>, round: usize, rng: &mut SeededRng) -> Result<Choice> {
    if round == 0 {
        return Ok(Choice::from_cooperation(rng.coin()));
    }
    let same = view.own(round - 1)? == view.opponent(round - 1)?;
    Ok(Choice::from_cooperation(same))
}

fn execute_memory_one(
    view: &SeatView<'_>,
    round: usize,
    params: &MemoryOneParams,
    rng: &mut SeededRng,
) -> Result<Choice> {
    let probability = if round == 0 {
        params.p
    } else {
        match (view.own(round - 1)?, view.opponent(round - 1)?) {
            (Choice::Defect, Choice::Defect) => params.p,
            (Choice::Defect, Choice::Cooperate) => params.q,
            (Choice::Cooperate, Choice::Defect) => params.r,
            (Choice::Cooperate, Choice::Cooperate) => params.s,
        }
    };
    Ok(Choice::from_cooperation(rng.chance(probability)))
}

fn execute_reactive(
    view: &SeatView<'_>,
    round: usize,
    params: &ReactiveParams,
    rng: &mut SeededRng,
) -> Result<Choice> {
    let probability = match opponent_last(view, round)? {
        None => params.y,
        Some(Choice::Defect) => params.p,
        Some(Choice::Cooperate) => params.q,
    };
    Ok(Choice::from_cooperation(rng.chance(probability)))
}

/// Pick the move whose projected opponent score lands closest to
/// `target` per round played. Ties go to the earlier outcome in CC, CD, DC, DD.
///
/// The goal is `(round + 1) * target` rather than `round * target`: the
/// projection includes the round being decided, so the goal counts it too.
/// `round` is zero-based.
fn execute_equalizer(
    view: &SeatView<'_>,
    round: usize,
    payoffs: &PayoffTable,
    state: &mut StrategyState,
) -> Result<Choice> {
    let StrategyState::Equalizer { target, counts } = state else {
        return Err(DilemmaError::InvalidState);
    };
    if let Some(prev) = round.checked_sub(1) {
        counts.record(view.own(prev)?, view.opponent(prev)?);
    }

    let current = counts.score(payoffs);
    let goal = (round + 1) as f64 * *target;

    let mut best = (Choice::Cooperate, f64::INFINITY);
    for own in [Choice::Cooperate, Choice::Defect] {
        for opponent in [Choice::Cooperate, Choice::Defect] {
            let (_, gained) = payoffs.resolve(own, opponent);
            let deviation = (current + gained as f64 - goal).abs();
            if deviation < best.1 {
                best = (own, deviation);
            }
        }
    }
    Ok(best.0)
}
