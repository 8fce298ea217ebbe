use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};

use super::util::{build_session, caller_auth, close_registry, open_registry};
use crate::cli::CallerArgs;
use warpstone::{
    CommandRouter, CompletionProvider, LocalSession, Location, Position, Session, WarpConfig,
};

const HELP: &str = "Commands:
  new <name> [x y z]           define a warp at your position or the given coordinates
  remove <name>                delete a warp
  edit <name> [x y z]          move a warp (its world never changes)
  teleport|tp <name>           travel to a warp
  complete [tokens...]         show suggestions for a partial command
  where                        print your current location
  goto <world> <x> <y> <z>     move yourself without a warp
  help                         this text
  quit/exit                    leave the REPL";

pub(crate) fn cmd_repl(config: &WarpConfig, caller: &CallerArgs) -> Result<()> {
    let mut session = build_session(caller, config)?;
    let auth = caller_auth(caller, config);
    let registry = open_registry(config);
    let router = CommandRouter::new(&registry);
    let completer = CompletionProvider::new(&registry);

    let stdin = io::stdin();
    let mut input = String::new();

    println!(
        "Warp REPL. Commands: new, remove, edit, teleport|tp, complete, where, goto, help, quit."
    );
    loop {
        print!("warp> ");
        io::stdout().flush().ok();
        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let line = input.trim();
        let mut tokens: Vec<&str> = line.split_whitespace().collect();
        if matches!(tokens.first(), Some(&"warp") | Some(&"/warp")) {
            tokens.remove(0);
        }
        let Some((cmd, rest)) = tokens.split_first() else {
            continue;
        };

        let result = match *cmd {
            "help" => {
                println!("{HELP}");
                Ok(())
            }
            "quit" | "exit" => break,
            "where" => {
                match session.location() {
                    Some(location) => println!("{location}"),
                    None => println!("no location (console caller)"),
                }
                Ok(())
            }
            "goto" => goto(&mut session, rest),
            "complete" => {
                let mut partial = rest.to_vec();
                if input.trim_end_matches(['\r', '\n']).ends_with(char::is_whitespace) {
                    partial.push("");
                }
                for suggestion in completer.suggest(&partial) {
                    println!("{suggestion}");
                }
                Ok(())
            }
            _ => {
                println!("{}", router.dispatch(&tokens, &auth, &mut session));
                Ok(())
            }
        };

        if let Err(err) = result {
            eprintln!("error: {err}");
        }
    }

    close_registry(registry);
    Ok(())
}

fn goto(session: &mut LocalSession, args: &[&str]) -> Result<()> {
    let [world, x, y, z] = args else {
        bail!("goto expects <world> <x> <y> <z>");
    };
    if !session.world_loaded(world) {
        let loaded: Vec<&str> = session.worlds().collect();
        bail!("world `{world}` is not loaded (loaded: {})", loaded.join(", "));
    }
    let position = Position::new(x.parse()?, y.parse()?, z.parse()?);
    if !position.is_finite() {
        bail!("coordinates must be finite");
    }
    session.set_location(Location::new(*world, position));
    println!("moved to {}", Location::new(*world, position));
    Ok(())
}
