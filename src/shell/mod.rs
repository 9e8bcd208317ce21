//! Interactive menu over a [`Session`]
//!
//! The shell collects validated input through a [`Prompter`], calls the
//! session controller and renders results. It is generic over the reader,
//! writer and store so it can run against stdin/stdout or in tests.

pub mod prompt;
pub mod render;

use crate::core::aggregator::Scale;
use crate::core::error::InputError;
use crate::core::input::{
    is_affirmative, parse_choice, parse_coefficient, parse_count, parse_credits, parse_date,
    parse_grade, parse_name,
};
use crate::core::models::{ExamRecord, ParameterUpdate};
use crate::core::session::Session;
use crate::core::store::RecordStore;
use crate::{debug, error};
use chrono::NaiveDate;
use std::io::{self, BufRead, Write};

pub use prompt::Prompter;

const SEPARATOR: &str = "\n═══════════════════ ═══════════════════════ ═══════════════════\n";

/// Whether the menu loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive menu bound to a session
#[derive(Debug)]
pub struct Shell<R, W, S: RecordStore> {
    session: Session<S>,
    prompt: Prompter<R, W>,
    scale: Scale,
}

impl<R: BufRead, W: Write, S: RecordStore> Shell<R, W, S> {
    /// Create a shell reading from `input` and writing to `output`
    pub const fn new(session: Session<S>, input: R, output: W, scale: Scale) -> Self {
        Self {
            session,
            prompt: Prompter::new(input, output),
            scale,
        }
    }

    /// Run the menu until the user exits or input ends
    ///
    /// # Errors
    /// Returns an error if the console cannot be read or written
    pub fn run(&mut self) -> io::Result<()> {
        self.prompt.print(&render::banner("GRADE MANAGER"))?;
        loop {
            self.prompt.print(render::MENU)?;
            let Some(choice) = self.prompt.ask("\n[+] Select an option: ")? else {
                return Ok(());
            };
            debug!("Menu choice '{}'", choice.trim());
            if self.dispatch(choice.trim())? == Flow::Exit {
                return Ok(());
            }
            self.prompt.say(SEPARATOR)?;
        }
    }

    /// Consume the shell, returning the session and the output sink
    pub fn into_parts(self) -> (Session<S>, W) {
        (self.session, self.prompt.into_output())
    }

    fn dispatch(&mut self, choice: &str) -> io::Result<Flow> {
        match choice {
            "1" => self.section("ADD EXAM", Self::add_exam),
            "2" => self.section("EDIT EXAM", Self::update_exam),
            "3" => self.section("REMOVE EXAM", Self::remove_exam),
            "4" => self.section("STARTING DEGREE GRADE", Self::show_starting_grade),
            "5" => self.section("RESET TRANSCRIPT", Self::reset),
            "6" => self.section("GRADE SIMULATION", Self::simulate),
            "7" => self.section("MODIFY PARAMETERS", Self::modify_parameters),
            "8" => self.section("ALL EXAMS", Self::list),
            "0" => {
                self.prompt.say("[!] Exiting program.")?;
                Ok(Flow::Exit)
            }
            _ => {
                self.prompt.say("[!] Invalid choice. Try again.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn section(&mut self, title: &str, action: fn(&mut Self) -> io::Result<()>) -> io::Result<Flow> {
        self.prompt.print(&render::banner(title))?;
        self.prompt.say("")?;
        action(self)?;
        Ok(Flow::Continue)
    }

    fn add_exam(&mut self) -> io::Result<()> {
        let pending = self.session.pending();
        let choice = if pending.is_empty() {
            0
        } else {
            let listing = render::exam_choices(&pending);
            let max = pending.len();
            self.prompt.say("[*] Exams registered WITH NO GRADE:")?;
            self.prompt.say(&listing)?;
            let Some(choice) = self.prompt.ask_until(
                "[+] Enter the exam index to register it, [0] to add a new exam: ",
                |raw| parse_choice(raw, 0, max),
            )?
            else {
                return Ok(());
            };
            self.prompt.say("")?;
            choice
        };

        if choice == 0 {
            return self.add_new_exam();
        }

        let selected = self.session.pending()[choice - 1].clone();
        self.prompt.say(&format!(
            "[*] Selected exam: {} - CFU {}",
            selected.name.to_uppercase(),
            selected.credits
        ))?;
        let Some((grade, date)) = self.ask_grade_and_date()? else {
            return Ok(());
        };
        match self.session.record_grade(choice, grade, date) {
            Ok(exam) => self.prompt.say(&format!(
                "[*] Exam updated: {} - Grade {}",
                exam.name, exam.grade
            )),
            Err(e) => self.report_error(&e),
        }
    }

    fn add_new_exam(&mut self) -> io::Result<()> {
        let Some(name) = self
            .prompt
            .ask_until("[+] Enter new exam name: ", parse_name)?
        else {
            return Ok(());
        };
        let Some(credits) = self.prompt.ask_until("[+] Enter exam CFU: ", parse_credits)? else {
            return Ok(());
        };
        let Some(answer) = self
            .prompt
            .ask("[+] Do you want to add a grade now? (y/n): ")?
        else {
            return Ok(());
        };

        let exam = if is_affirmative(&answer) {
            let Some((grade, date)) = self.ask_grade_and_date()? else {
                return Ok(());
            };
            ExamRecord::graded(name, credits, grade, date)
        } else {
            ExamRecord::new(name, credits)
        };

        let message = if exam.is_graded() {
            format!("[*] Exam added: {} - Grade {}", exam.name, exam.grade)
        } else {
            format!("[*] Exam added: {} (no grade yet)", exam.name)
        };
        match self.session.add_exam(exam) {
            Ok(()) => self.prompt.say(&message),
            Err(e) => self.report_error(&e),
        }
    }

    fn update_exam(&mut self) -> io::Result<()> {
        let graded = self.session.graded();
        if graded.is_empty() {
            return self
                .prompt
                .say("[!] No exams with grades found. Please add an exam first.");
        }
        let listing = render::exam_choices(&graded);
        self.prompt.say("[*] Exams registered:")?;
        self.prompt.say(&listing)?;

        let Some(index) = self.ask_index("[+] Select the exam to update (number): ")? else {
            return Ok(());
        };
        let Some(selected) = index
            .checked_sub(1)
            .and_then(|i| self.session.graded().get(i).copied().cloned())
        else {
            return self.prompt.say("[!] Invalid choice.");
        };

        self.prompt.say(&format!(
            "\n[*] Selected exam: {} - CFU {}",
            selected.name.to_uppercase(),
            selected.credits
        ))?;
        let Some((grade, date)) = self.ask_grade_and_date()? else {
            return Ok(());
        };
        match self.session.update_grade(index, grade, date) {
            Ok(exam) => self.prompt.say(&format!(
                "[*] Exam updated: {} - Grade {}",
                exam.name, exam.grade
            )),
            Err(e) => self.report_error(&e),
        }
    }

    fn remove_exam(&mut self) -> io::Result<()> {
        let all: Vec<&ExamRecord> = self.session.state().exams.iter().collect();
        if all.is_empty() {
            return self.prompt.say("[!] No exams registered yet.");
        }
        let listing = render::exam_choices(&all);
        self.prompt.say("[*] Available exams:")?;
        self.prompt.say(&listing)?;

        let Some(index) = self.ask_index("[+] Select the exam to remove (number): ")? else {
            return Ok(());
        };
        match self.session.remove_exam(index) {
            Ok(exam) => self
                .prompt
                .say(&format!("[*] Exam removed: {}", exam.name)),
            Err(e) => self.report_error(&e),
        }
    }

    fn show_starting_grade(&mut self) -> io::Result<()> {
        if self.session.state().exams.is_empty() {
            return self.prompt.say("[!] No exams found. Please add exams first.");
        }
        let result = self.session.starting_grade(self.scale);
        self.prompt.print(&render::starting_grade(&result))
    }

    fn reset(&mut self) -> io::Result<()> {
        let Some(answer) = self
            .prompt
            .ask("[!] Are you sure you want to reset all exams? (y/n): ")?
        else {
            return Ok(());
        };
        if !is_affirmative(&answer) {
            return self.prompt.say("[!] Reset cancelled.");
        }
        match self.session.reset() {
            Ok(()) => self.prompt.say("    All exams have been reset."),
            Err(e) => self.report_error(&e),
        }
    }

    fn simulate(&mut self) -> io::Result<()> {
        let Some(grade) = self.prompt.ask_until("[+] Enter exam grade: ", parse_grade)? else {
            return Ok(());
        };
        let Some(credits) = self.prompt.ask_until("[+] Enter exam CFU: ", parse_credits)? else {
            return Ok(());
        };
        let result = self.session.simulate(grade, credits, self.scale);
        self.prompt.print(&render::starting_grade(&result))
    }

    fn modify_parameters(&mut self) -> io::Result<()> {
        let current = self.session.parameters().clone();
        self.prompt.say("[*] Current parameters:")?;
        self.prompt.say(&render::parameters(&current))?;

        let Some(answer) = self
            .prompt
            .ask("[+] Do you want to modify these parameters? (y/n): ")?
        else {
            return Ok(());
        };
        if !is_affirmative(&answer) {
            return self.prompt.say("[!] Parameter modification cancelled.");
        }

        self.prompt
            .say("\n[*] Enter new values (press Enter to keep current value):")?;
        let Some(delay_years) = self.prompt.ask_until(
            &format!("    fuori_corso (current: {}): ", current.delay_years),
            |raw| optional(raw, parse_count),
        )?
        else {
            return Ok(());
        };
        let Some(discount_credits) = self.prompt.ask_until(
            &format!("    cfu_off (current: {}): ", current.discount_credits),
            |raw| optional(raw, parse_count),
        )?
        else {
            return Ok(());
        };
        let Some(bonus_coefficient) = self.prompt.ask_until(
            &format!("    alpha (current: {}): ", current.bonus_coefficient),
            |raw| optional(raw, parse_coefficient),
        )?
        else {
            return Ok(());
        };

        let update = ParameterUpdate {
            delay_years,
            discount_credits,
            bonus_coefficient,
        };
        match self.session.set_parameters(&update) {
            Ok(params) => {
                let text = render::parameters(params);
                self.prompt.say("[*] Parameters updated:")?;
                self.prompt.print(&text)
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn list(&mut self) -> io::Result<()> {
        let text = render::transcript(self.session.state());
        self.prompt.print(&text)
    }

    fn ask_grade_and_date(&mut self) -> io::Result<Option<(u8, Option<NaiveDate>)>> {
        let Some(grade) = self.prompt.ask_until("    Grade: ", parse_grade)? else {
            return Ok(None);
        };
        let Some(date) = self.prompt.ask_until("    Date (DD-MM-YYYY): ", parse_date)? else {
            return Ok(None);
        };
        Ok(Some((grade, date)))
    }

    /// Read a 1-based index; a non-number is reported and aborts the operation
    fn ask_index(&mut self, prompt: &str) -> io::Result<Option<usize>> {
        let Some(raw) = self.prompt.ask(prompt)? else {
            return Ok(None);
        };
        match raw.trim().parse::<usize>() {
            Ok(index) => Ok(Some(index)),
            Err(_) => {
                self.prompt.say("[!] Invalid choice.")?;
                Ok(None)
            }
        }
    }

    fn report_error(&mut self, err: &dyn std::error::Error) -> io::Result<()> {
        error!("{err}");
        self.prompt.say(&format!("[!] {err}"))
    }
}

fn optional<T>(
    raw: &str,
    parse: fn(&str) -> Result<T, InputError>,
) -> Result<Option<T>, InputError> {
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        parse(raw).map(Some)
    }
}
