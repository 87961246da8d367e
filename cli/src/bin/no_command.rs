use std::process::ExitCode;

use program_core::{KeyValueTable, MainResult, OptionDef, Program};

fn main() -> ExitCode {
    match program() {
        Ok(mut p) => program_cli::execute(&mut p),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn program() -> program_core::Result<Program> {
    let mut p = Program::new("no-command", "an example program without any command");

    p.add_flag(None, Some("flag-a"), "a long flag")?;
    p.add_flag(Some('b'), None, "a short flag")?;
    p.add_option(
        OptionDef::with_value(Some('c'), Some("option-c"), "value")
            .with_default("foo")
            .with_description("an option with both a short and long name"),
    )?;

    p.add_argument("arg-1", "the first argument")?;
    p.add_argument("arg-2", "the second argument")?;
    p.add_optional_argument("arg-opt-1", "the first optional argument")?;
    p.add_optional_argument("arg-opt-2", "the second optional argument")?;
    p.add_trailing_argument("arg-trailing", "all trailing arguments")?;

    p.set_main(run)?;
    Ok(p)
}

fn run(p: &Program) -> MainResult {
    p.debug(2, "running program");

    let mut t = KeyValueTable::new();
    t.add_row("flag-a", p.is_option_set("flag-a"));
    t.add_row("b", p.is_option_set("b"));
    t.add_row("option-c", p.option_value("option-c"));
    t.add_row("arg-1", p.argument_value("arg-1"));
    t.add_row("arg-2", p.argument_value("arg-2"));
    t.add_row("arg-opt-1", p.argument_value("arg-opt-1"));
    t.add_row("arg-opt-2", p.argument_value("arg-opt-2"));
    t.add_row("arg-trailing", p.trailing_argument_values("arg-trailing").join(" "));
    t.print()?;

    Ok(())
}
