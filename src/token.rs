/// Built-in opcodes of the language.
/// ***Opcode names are matched exactly and are case-sensitive***
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Op {
    Push,
    Pall,
    Pint,
    Pop,
    Swap,
    Add,
    Nop,
    Sub,
    Div,
    Mul,
    Mod,
    Pchar,
    Pstr,
    Rotl,
    Rotr,
    Stack,
    Queue,
}

impl Op {
    /// Every built-in opcode, in dispatch-table order.
    pub const ALL: [Op; 17] = [
        Op::Push,
        Op::Pall,
        Op::Pint,
        Op::Pop,
        Op::Swap,
        Op::Add,
        Op::Nop,
        Op::Sub,
        Op::Div,
        Op::Mul,
        Op::Mod,
        Op::Pchar,
        Op::Pstr,
        Op::Rotl,
        Op::Rotr,
        Op::Stack,
        Op::Queue,
    ];

    /// Mnemonic as written in scripts.
    pub fn name(self) -> &'static str {
        match self {
            Op::Push => "push",
            Op::Pall => "pall",
            Op::Pint => "pint",
            Op::Pop => "pop",
            Op::Swap => "swap",
            Op::Add => "add",
            Op::Nop => "nop",
            Op::Sub => "sub",
            Op::Div => "div",
            Op::Mul => "mul",
            Op::Mod => "mod",
            Op::Pchar => "pchar",
            Op::Pstr => "pstr",
            Op::Rotl => "rotl",
            Op::Rotr => "rotr",
            Op::Stack => "stack",
            Op::Queue => "queue",
        }
    }
}
