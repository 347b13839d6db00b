//! Opcode name to handler mapping

use std::collections::HashMap;

use crate::{
    ops::{self, Handler},
    token::Op,
};

/// Handler table consulted for the first token of every instruction line.
#[derive(Clone)]
pub struct DispatchTable {
    handlers: HashMap<&'static str, Handler>,
}

impl DispatchTable {
    /// Table holding every built-in opcode
    pub fn new() -> Self {
        let mut handlers: HashMap<&'static str, Handler> = HashMap::with_capacity(Op::ALL.len());
        for op in Op::ALL {
            handlers.insert(op.name(), builtin(op));
        }

        DispatchTable { handlers }
    }

    /// Add an opcode, or replace the handler of an existing one. Returns the
    /// handler that was replaced.
    pub fn register(&mut self, name: &'static str, handler: Handler) -> Option<Handler> {
        self.handlers.insert(name, handler)
    }

    /// Exact, case-sensitive lookup
    pub fn get(&self, name: &str) -> Option<Handler> {
        self.handlers.get(name).copied()
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin(op: Op) -> Handler {
    match op {
        Op::Push => ops::push,
        Op::Pall => ops::pall,
        Op::Pint => ops::pint,
        Op::Pop => ops::pop,
        Op::Swap => ops::swap,
        Op::Add => ops::add,
        Op::Nop => ops::nop,
        Op::Sub => ops::sub,
        Op::Div => ops::div,
        Op::Mul => ops::mul,
        Op::Mod => ops::modulo,
        Op::Pchar => ops::pchar,
        Op::Pstr => ops::pstr,
        Op::Rotl => ops::rotl,
        Op::Rotr => ops::rotr,
        Op::Stack => ops::stack,
        Op::Queue => ops::queue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{chain::Chain, error::Result, ops::{Context, Flow}};

    fn halt(_chain: &mut Chain, _ctx: &mut Context<'_>) -> Result<Flow> {
        Ok(Flow::Terminate(3))
    }

    #[test]
    fn builtins() {
        let table = DispatchTable::new();
        for op in Op::ALL {
            assert!(table.get(op.name()).is_some());
        }
        assert!(table.get("Push").is_none());
        assert!(table.get("push ").is_none());
        assert!(table.get("jmp").is_none());
    }

    #[test]
    fn register() {
        let mut table = DispatchTable::new();
        assert!(table.register("halt", halt).is_none());
        assert!(table.get("halt").is_some());

        // replacing returns the previous handler
        assert!(table.register("nop", halt).is_some());

        let mut chain = Chain::new();
        let mut out = Vec::new();
        let mut ctx = Context {
            line: 1,
            operands: &[],
            out: &mut out,
        };
        let handler = table.get("nop").unwrap();
        assert_eq!(handler(&mut chain, &mut ctx).unwrap(), Flow::Terminate(3));
    }
}
