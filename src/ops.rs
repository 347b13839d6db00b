//! Opcode handlers.
//!
//! A handler gets exclusive access to the chain for one instruction. It
//! reports failures as errors and leaves printing diagnostics and exiting
//! to the execution loop.

use std::io::Write;

use crate::{
    chain::Chain,
    error::{Error, Result},
};

/// What the execution loop should do after an instruction.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Flow {
    /// Go on with the next line.
    Continue,
    /// Stop the run and exit with the given code.
    Terminate(i32),
}

/// Per-instruction state handed to a handler.
pub struct Context<'a> {
    /// 1-based script line of the instruction
    pub line: usize,
    /// Tokens after the opcode
    pub operands: &'a [&'a str],
    /// Program output
    pub out: &'a mut dyn Write,
}

/// Signature shared by every handler.
pub type Handler = fn(&mut Chain, &mut Context<'_>) -> Result<Flow>;

/// Push the operand onto the chain
pub fn push(chain: &mut Chain, ctx: &mut Context<'_>) -> Result<Flow> {
    let value = ctx
        .operands
        .first()
        .and_then(|operand| parse_integer(operand))
        .ok_or(Error::InvalidOperand { line: ctx.line })?;

    chain.push_front(value)?;
    Ok(Flow::Continue)
}

/// Print every value, head first
pub fn pall(chain: &mut Chain, ctx: &mut Context<'_>) -> Result<Flow> {
    for value in chain.iter() {
        writeln!(ctx.out, "{}", value)?;
    }
    Ok(Flow::Continue)
}

/// Print the head value
pub fn pint(chain: &mut Chain, ctx: &mut Context<'_>) -> Result<Flow> {
    let value = chain.front().ok_or_else(|| underflow(ctx.line, "pint", 1))?;
    writeln!(ctx.out, "{}", value)?;
    Ok(Flow::Continue)
}

/// Discard one value; which end depends on the chain mode
pub fn pop(chain: &mut Chain, ctx: &mut Context<'_>) -> Result<Flow> {
    chain.pop().ok_or_else(|| underflow(ctx.line, "pop", 1))?;
    Ok(Flow::Continue)
}

/// Exchange the two frontmost values
pub fn swap(chain: &mut Chain, ctx: &mut Context<'_>) -> Result<Flow> {
    if !chain.swap_front() {
        return Err(underflow(ctx.line, "swap", 2));
    }
    Ok(Flow::Continue)
}

/// Add two values
pub fn add(chain: &mut Chain, ctx: &mut Context<'_>) -> Result<Flow> {
    arithmetic(chain, ctx.line, "add", i32::wrapping_add)
}

/// Subtract the head from the value below it
pub fn sub(chain: &mut Chain, ctx: &mut Context<'_>) -> Result<Flow> {
    arithmetic(chain, ctx.line, "sub", i32::wrapping_sub)
}

/// Divide the value below the head by the head
pub fn div(chain: &mut Chain, ctx: &mut Context<'_>) -> Result<Flow> {
    check_divisor(chain, ctx.line, "div")?;
    arithmetic(chain, ctx.line, "div", i32::wrapping_div)
}

/// Multiply two values
pub fn mul(chain: &mut Chain, ctx: &mut Context<'_>) -> Result<Flow> {
    arithmetic(chain, ctx.line, "mul", i32::wrapping_mul)
}

/// Remainder of dividing the value below the head by the head
pub fn modulo(chain: &mut Chain, ctx: &mut Context<'_>) -> Result<Flow> {
    check_divisor(chain, ctx.line, "mod")?;
    arithmetic(chain, ctx.line, "mod", i32::wrapping_rem)
}

/// Print the head value as an ASCII character
pub fn pchar(chain: &mut Chain, ctx: &mut Context<'_>) -> Result<Flow> {
    let value = chain.front().ok_or_else(|| underflow(ctx.line, "pchar", 1))?;
    let ch = ascii(value).ok_or(Error::InvalidCharacterCode {
        line: ctx.line,
        value,
    })?;

    writeln!(ctx.out, "{}", ch)?;
    Ok(Flow::Continue)
}

/// Print values as characters from the head until a zero, a non-ASCII value
/// or the end of the chain
pub fn pstr(chain: &mut Chain, ctx: &mut Context<'_>) -> Result<Flow> {
    let text: String = chain
        .iter()
        .map_while(|value| ascii(value).filter(|&ch| ch != '\0'))
        .collect();

    writeln!(ctx.out, "{}", text)?;
    Ok(Flow::Continue)
}

/// Head becomes tail
pub fn rotl(chain: &mut Chain, _ctx: &mut Context<'_>) -> Result<Flow> {
    chain.rotate_left();
    Ok(Flow::Continue)
}

/// Tail becomes head
pub fn rotr(chain: &mut Chain, _ctx: &mut Context<'_>) -> Result<Flow> {
    chain.rotate_right();
    Ok(Flow::Continue)
}

/// Switch to LIFO
pub fn stack(chain: &mut Chain, _ctx: &mut Context<'_>) -> Result<Flow> {
    chain.to_stack_mode();
    Ok(Flow::Continue)
}

/// Switch to FIFO
pub fn queue(chain: &mut Chain, _ctx: &mut Context<'_>) -> Result<Flow> {
    chain.to_queue_mode();
    Ok(Flow::Continue)
}

/// Pass
pub fn nop(_chain: &mut Chain, _ctx: &mut Context<'_>) -> Result<Flow> {
    Ok(Flow::Continue)
}

/// Replace `[b, a, ..]` with `[a OP b, ..]`
fn arithmetic(
    chain: &mut Chain,
    line: usize,
    opcode: &'static str,
    apply: fn(i32, i32) -> i32,
) -> Result<Flow> {
    let (rhs, lhs) = chain.peek_two().ok_or_else(|| underflow(line, opcode, 2))?;

    chain.pop_front();
    chain.set_front(apply(lhs, rhs));

    Ok(Flow::Continue)
}

/// Fails before anything is popped, so the chain is left as it was.
fn check_divisor(chain: &Chain, line: usize, opcode: &'static str) -> Result<()> {
    match chain.peek_two() {
        None => Err(underflow(line, opcode, 2)),
        Some((0, _)) => Err(Error::DivisionByZero { line }),
        Some(_) => Ok(()),
    }
}

fn underflow(line: usize, opcode: &'static str, needed: usize) -> Error {
    Error::StackUnderflow {
        line,
        opcode,
        needed,
    }
}

fn ascii(value: i32) -> Option<char> {
    u8::try_from(value)
        .ok()
        .filter(u8::is_ascii)
        .map(char::from)
}

/// An optional `-` followed by decimal digits, within `i32` range.
fn parse_integer(operand: &str) -> Option<i32> {
    let digits = operand.strip_prefix('-').unwrap_or(operand);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    operand.parse().ok()
}
