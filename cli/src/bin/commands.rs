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
    let mut p = Program::new("commands", "an example program with commands");

    p.add_flag(None, Some("flag-a"), "a long flag")?;
    p.add_flag(Some('b'), None, "a short flag")?;
    p.add_option(
        OptionDef::with_value(Some('c'), Some("option-c"), "value")
            .with_default("foo")
            .with_description("an option with both a short and long name"),
    )?;

    let mut c = p.add_command("foo", "foo command", cmd_foo)?;
    c.add_flag(Some('d'), Some("flag-d"), "a command flag")?;
    c.add_argument("arg-1", "the first argument")?;
    c.add_argument("arg-2", "the second argument")?;
    c.add_trailing_argument("arg-3", "all trailing arguments")?;

    let mut c = p.add_command("bar", "bar command", cmd_bar)?;
    c.add_optional_argument("arg-opt", "the optional argument")?;

    Ok(p)
}

fn running(p: &Program) {
    p.info(format!(
        "running command {:?}",
        p.command_full_name().unwrap_or_default()
    ));
}

fn cmd_foo(p: &Program) -> MainResult {
    running(p);

    let mut t = KeyValueTable::new();
    t.add_row("flag-a", p.is_option_set("flag-a"));
    t.add_row("b", p.is_option_set("b"));
    t.add_row("option-c", p.option_value("option-c"));
    t.add_row("flag-d", p.is_option_set("flag-d"));
    t.add_row("arg-1", p.argument_value("arg-1"));
    t.add_row("arg-2", p.argument_value("arg-2"));
    t.add_row("arg-3", p.trailing_argument_values("arg-3").join(" "));
    t.print()?;

    Ok(())
}

fn cmd_bar(p: &Program) -> MainResult {
    running(p);

    let mut t = KeyValueTable::new();
    t.add_row("flag-a", p.is_option_set("flag-a"));
    t.add_row("b", p.is_option_set("b"));
    t.add_row("option-c", p.option_value("option-c"));
    t.add_row("arg-opt", p.optional_argument_value("arg-opt").unwrap_or("-"));
    t.print()?;

    Ok(())
}
