/*!
  The console loop. A session reads one line at a time, hands it to the engine, and redraws
  the surface after every change. It ends on `q`, at the end of input, or when the console or
  the surface fails. Malformed numbers never end a session; they are reported and the loop
  carries on.
*/

use std::io::{BufRead, Write};

use tracing::{info, warn};

use crate::display::{render, Surface};
use crate::engine::{Engine, Outcome};
use crate::error::{ParseError, SessionError};

pub const PROMPT: &str =
  "Enter number (0x/0b/0d or dec), op (+,-,<<,>>,and,or,xor,invert,hex,dec,bin), 'c' clear, 'q' quit:";
pub const NUMBER_EXAMPLES: &str = "0x1A2B, 0b1010_1111, 0d42, 1234";

pub struct Session<R, W, S> {
  engine  : Engine,
  input   : R,
  output  : W,
  surface : S,
  quiet   : bool,   // Suppress the prompt
}

impl<R, W, S> Session<R, W, S>
  where R: BufRead,
        W: Write,
        S: Surface
{
  pub fn new(input: R, output: W, surface: S) -> Self {
    Session {
      engine: Engine::new(),
      input,
      output,
      surface,
      quiet: false
    }
  }

  pub fn quiet(mut self, quiet: bool) -> Self {
    self.quiet = quiet;
    self
  }

  pub fn engine(&self) -> &Engine {
    &self.engine
  }

  pub fn surface(&self) -> &S {
    &self.surface
  }

  pub fn output(&self) -> &W {
    &self.output
  }

  /// Draws the initial screen, then processes lines until quit or end of input.
  pub fn run(&mut self) -> Result<(), SessionError> {
    info!("session started");
    render(&self.engine.snapshot(), &mut self.surface)?;

    let mut raw = Vec::new();
    loop {
      if !self.quiet {
        write!(
          self.output,
          "[result=0x{:016X}] {}\n> ",
          self.engine.accumulator(),
          PROMPT
        )?;
        self.output.flush()?;
      }

      raw.clear();
      if self.input.read_until(b'\n', &mut raw)? == 0 {
        writeln!(self.output)?;
        info!("end of input");
        break;
      }
      // Bytes that are not UTF-8 become replacement characters and fail as digits.
      let line = String::from_utf8_lossy(&raw);

      if line.trim().is_empty() {
        continue;
      }

      match self.engine.accept(&line) {

        Outcome::Quit => {
          info!("quit");
          break;
        }

        Outcome::Rejected(e) => {
          warn!(line = %line.trim(), error = %e, "invalid number");
          self.report(e)?;
        }

        Outcome::Updated => {
          #[cfg(feature = "trace_computation")]
          writeln!(self.output, "{}", self.engine)?;

          render(&self.engine.snapshot(), &mut self.surface)?;
        }

      } // end match on outcome
    } // end loop

    self.output.flush()?;
    info!(accumulator = self.engine.accumulator(), "session ended");
    Ok(())
  }

  fn report(&mut self, e: ParseError) -> Result<(), SessionError> {
    writeln!(self.output, " !! Invalid number ({}). Examples: {}", e, NUMBER_EXAMPLES)?;
    Ok(())
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Cursor;

  use crate::display::Canvas;
  use crate::number::Radix;

  type TestSession = Session<Cursor<Vec<u8>>, Vec<u8>, Canvas<Vec<u8>>>;

  fn session(script: &str) -> TestSession {
    let canvas = Canvas::new(128, 64, Vec::new()).unwrap();
    let mut s = Session::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), canvas);
    s.run().unwrap();
    s
  }

  fn output(s: &TestSession) -> String {
    String::from_utf8(s.output().clone()).unwrap()
  }

  #[test]
  fn renders_initial_screen_and_each_update(){
    let s = session("0x10\n+\n0x20\nhex\n");
    assert_eq!(s.engine().accumulator(), 0x30);
    // Initial screen plus one per accepted line.
    assert_eq!(s.surface().pushes(), 5);
    assert_eq!(s.surface().row_text(0), None);
    assert_eq!(s.surface().row_text(1), Some("OPERATION: add"));
    assert_eq!(s.surface().row_text(3), Some("0x0000_0000_0000_0030"));
  }

  #[test]
  fn echo_row_follows_last_token(){
    let s = session("7\n+\n");
    assert_eq!(s.surface().row_text(0), None);
    let s = session("+\n42\n");
    assert_eq!(s.surface().row_text(0), Some("42"));
  }

  #[test]
  fn prompt_shows_accumulator(){
    let s = session("255\n");
    let out = output(&s);
    assert!(out.starts_with("[result=0x0000000000000000] Enter number"));
    assert!(out.contains("[result=0x00000000000000FF]"));
  }

  #[test]
  fn quit_stops_reading(){
    let s = session("1\nq\n2\n");
    assert_eq!(s.engine().accumulator(), 1);
    assert_eq!(s.surface().pushes(), 2);
  }

  #[test]
  fn end_of_input_ends_cleanly(){
    let s = session("5");
    assert_eq!(s.engine().accumulator(), 5);
    assert!(output(&s).ends_with("\n"));
  }

  #[test]
  fn invalid_numbers_are_reported_without_redraw(){
    let s = session("12\n0xGG\n");
    assert_eq!(s.engine().accumulator(), 12);
    assert_eq!(s.surface().pushes(), 2);
    assert!(output(&s).contains(" !! Invalid number (invalid digit `G`). Examples: 0x1A2B"));
  }

  #[test]
  fn malformed_bytes_are_an_invalid_number(){
    let canvas = Canvas::new(128, 64, Vec::new()).unwrap();
    let input = Cursor::new(b"5\n\xff\xfe\n7\n".to_vec());
    let mut s = Session::new(input, Vec::new(), canvas).quiet(true);
    assert!(s.run().is_ok());
    assert_eq!(s.engine().accumulator(), 7);
    assert_eq!(s.surface().pushes(), 3);
    assert!(output(&s).starts_with(" !! Invalid number (invalid digit `\u{FFFD}`)."));
  }

  #[test]
  fn blank_lines_are_skipped(){
    let s = session("\n   \n3\n");
    assert_eq!(s.surface().pushes(), 2);
    assert!(!output(&s).contains("!!"));
  }

  #[test]
  fn display_modes(){
    let s = session("0x1_0001\nbin\n");
    assert_eq!(s.engine().radix(), Radix::Binary);
    assert_eq!(s.surface().row_text(3), Some("0b...0000000000000001"));
    let s = session("1234\ndec\n");
    // 21 characters fit on a 128 pixel row.
    assert_eq!(s.surface().row_text(1), Some("OPERATION: display de"));
    assert_eq!(s.surface().row_text(3), Some("1234"));
  }

  #[test]
  fn quiet_session_has_no_prompt(){
    let canvas = Canvas::new(128, 64, Vec::new()).unwrap();
    let mut s = Session::new(Cursor::new(b"1\nq\n".to_vec()), Vec::new(), canvas).quiet(true);
    s.run().unwrap();
    assert!(output(&s).is_empty());
  }
}
