use crate::{ParseError, ParserLimits, ParserStats, StackMachine};
use std::fmt::Debug;

/// What the driver asks the machine to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParserAction<P> {
    /// Move the lookahead onto the stack.
    Shift,
    /// Apply production `P` to the top of the stack.
    Reduce(P),
    /// Production `P` matched, but the lookahead decides between shifting and
    /// reducing; see [`ParserDriver::resolve_ambiguity`].
    Ambig(P),
    /// Stop and return the stack.
    Accept,
}

/// A production identifier of a hand-written grammar.
pub trait ParserProdID: Copy + Debug + Eq {
    /// Short human-readable name, used in traces and error messages.
    fn label(&self) -> &'static str;

    /// Number of stack entries consumed by the production.
    fn size(&self) -> usize;
}

/// Grammar-specific behavior plugged into [`Parser`].
///
/// The driver owns the rule table: `lookup` finds the first production whose
/// shape matches the top of the stack, `resolve_ambiguity` settles
/// lookahead-dependent choices, and `reduce` pops the matched entries and
/// pushes the synthesized node.
pub trait ParserDriver {
    /// Stack entry type. Raw input characters become entries through
    /// `From<char>` when shifted.
    type Symbol: Debug + From<char>;

    type ProdID: ParserProdID;

    /// Returns `Reduce` or `Ambig` for the highest-priority production
    /// matching `stack`, or `None` when no production applies.
    fn lookup(&self, stack: &[Self::Symbol]) -> Option<ParserAction<Self::ProdID>>;

    /// Chooses `Shift` or `Reduce(prod_id)` for an ambiguous match by looking
    /// at the machine's lookahead.
    fn resolve_ambiguity(
        &mut self,
        machine: &StackMachine<Self::Symbol>,
        prod_id: Self::ProdID,
    ) -> Result<ParserAction<Self::ProdID>, ParseError>;

    /// Performs the reduction for `prod_id`.
    fn reduce(
        &mut self,
        machine: &mut StackMachine<Self::Symbol>,
        prod_id: Self::ProdID,
    ) -> Result<(), ParseError>;
}

/// Runs a [`ParserDriver`] over a [`StackMachine`].
///
/// Each step re-evaluates the driver's rules from the top. When no rule
/// matches, the machine shifts, or accepts once the input is exhausted.
/// Malformed input therefore ends with whatever stack the rules could build;
/// only internal invariant violations are returned as errors.
pub struct Parser<D>
where
    D: ParserDriver,
{
    machine: StackMachine<D::Symbol>,
    driver: D,
}

impl<D> Parser<D>
where
    D: ParserDriver,
{
    pub fn new(driver: D, limits: ParserLimits) -> Self {
        Self {
            machine: StackMachine::new(limits),
            driver,
        }
    }

    pub fn machine(&self) -> &StackMachine<D::Symbol> {
        &self.machine
    }

    pub fn stats(&self) -> ParserStats {
        self.machine.stats.clone()
    }

    /// Parses one unit of `text` and returns the final stack, bottom first.
    pub fn parse(&mut self, text: &str) -> Result<Vec<D::Symbol>, ParseError> {
        self.machine.reset(text)?;
        loop {
            self.machine.stats.steps += 1;
            if log::log_enabled!(log::Level::Trace) {
                self.machine.dump_state();
            }
            let action = match self.driver.lookup(self.machine.tokens()) {
                Some(ParserAction::Ambig(prod_id)) => {
                    log::trace!("Ambig {}", prod_id.label());
                    self.machine.stats.ambigs += 1;
                    self.driver.resolve_ambiguity(&self.machine, prod_id)?
                }
                Some(action) => action,
                None => match self.machine.lookahead() {
                    Some(_) => ParserAction::Shift,
                    None => ParserAction::Accept,
                },
            };
            match action {
                ParserAction::Shift => {
                    log::trace!("Shift {:?}", self.machine.lookahead());
                    self.machine.shift()?;
                }
                ParserAction::Reduce(prod_id) => {
                    log::trace!("Reduce {}({})", prod_id.label(), prod_id.size());
                    self.driver.reduce(&mut self.machine, prod_id)?;
                    self.machine.stats.reductions += 1;
                }
                ParserAction::Accept => {
                    let stats = &self.machine.stats;
                    log::debug!(
                        "Accept after {} steps ({} shifts, {} reductions, {} elisions, {} ambigs)",
                        stats.steps,
                        stats.shifts,
                        stats.reductions,
                        stats.elisions,
                        stats.ambigs
                    );
                    return Ok(self.machine.take_tokens());
                }
                ParserAction::Ambig(prod_id) => {
                    return Err(ParseError::new(
                        format!("unresolved ambiguity in {}", prod_id.label()),
                        Some(self.machine.span()),
                    ));
                }
            }
        }
    }
}
