//! Execution loop that runs a script line by line

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::{
    chain::Chain,
    config::Config,
    dispatch::DispatchTable,
    error::{Error, Result},
    lexer::Line,
    ops::{Context, Flow},
};

/// Interpreter state for one script at a time
pub struct Interpreter {
    config: Config,
    table: DispatchTable,
    chain: Chain,
    executed: usize,       // handler invocations in the current run
    pub halt: Option<i32>, // exit code requested by a handler
}

impl Interpreter {
    pub fn new(config: Config) -> Self {
        Self::with_table(config, DispatchTable::new())
    }

    /// Interpreter that dispatches through a custom table
    pub fn with_table(config: Config, table: DispatchTable) -> Self {
        Interpreter {
            chain: Chain::with_mode(config.initial_mode),
            config,
            table,
            executed: 0,
            halt: None,
        }
    }

    pub fn table_mut(&mut self) -> &mut DispatchTable {
        &mut self.table
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Number of handlers invoked by the last (or current) run
    pub fn executed(&self) -> usize {
        self.executed
    }

    /// Run a whole script and return its exit code.
    ///
    /// Execution stops at the end of input, at the first error, or when a
    /// handler asks to terminate. The chain is released on every one of those
    /// paths.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<i32> {
        self.chain = Chain::with_mode(self.config.initial_mode);
        self.executed = 0;
        self.halt = None;

        let result = self.run_lines(input, out);
        let flushed = out.flush();

        self.chain.release();
        debug!(executed = self.executed, "chain released");

        match &result {
            Ok(code) => info!(exit_code = code, executed = self.executed, "script finished"),
            Err(err) => debug!(error = %err, "script aborted"),
        }

        let code = result?;
        flushed?;
        Ok(code)
    }

    /// Run a script held in memory
    pub fn run_str<W: Write>(&mut self, script: &str, out: &mut W) -> Result<i32> {
        self.run(script.as_bytes(), out)
    }

    fn run_lines<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<i32> {
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                return Ok(0);
            }
            line_no += 1;

            // Scripts are bytes; invalid UTF-8 only ever turns into a bad
            // token, never a read failure.
            let line = String::from_utf8_lossy(&buf);

            if let Flow::Terminate(exit_code) = self.execute_line(line_no, &line, out)? {
                debug!(line = line_no, exit_code, "terminate requested");
                self.halt = Some(exit_code);
                return Ok(exit_code);
            }
        }
    }

    /// Tokenize one line and run its handler. Blank and comment lines are
    /// skipped without touching the chain.
    pub fn execute_line(&mut self, line_no: usize, line: &str, out: &mut dyn Write) -> Result<Flow> {
        let (opcode, operands) = match Line::parse(line) {
            Line::Blank | Line::Comment => return Ok(Flow::Continue),
            Line::Instruction { opcode, operands } => (opcode, operands),
        };

        let handler = match self.table.get(opcode) {
            Some(handler) => handler,
            None => {
                return Err(Error::UnknownOpcode {
                    line: line_no,
                    opcode: opcode.to_string(),
                })
            }
        };

        debug!(line = line_no, opcode, "dispatch");
        self.executed += 1;

        let mut ctx = Context {
            line: line_no,
            operands: &operands,
            out,
        };
        handler(&mut self.chain, &mut ctx)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
