//! Simple command that prints one or '-n count' version 1 UUID strings, or a name-based one

use std::{env, io, io::Write, process::ExitCode};

use uuid1::{Encoding, Format, Uuid};

const USAGE: &str = "[-n count] [-f N|D|B|P|U] [-v 1|3|5 [-s dns|url|oid|x500] name]";

#[derive(Debug, Default)]
struct Options {
    count: Option<usize>,
    format: Option<Format>,
    version: Option<u8>,
    namespace: Option<Uuid>,
    name: Option<String>,
}

fn main() -> io::Result<ExitCode> {
    let opts = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(opts) => opts,
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!(
                    "Usage: {} {}",
                    program.as_deref().unwrap_or("uuidgen"),
                    USAGE
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    let format = opts.format.unwrap_or_default();
    let mut buf = io::BufWriter::new(io::stdout());
    match (opts.version, opts.name) {
        (Some(version @ (3 | 5)), Some(name)) => {
            let namespace = opts.namespace.unwrap_or(Uuid::NAMESPACE_DNS);
            let uuid: Uuid = if version == 3 {
                uuid1::uuid3(&namespace, &name, Encoding::Utf8).into()
            } else {
                uuid1::uuid5(&namespace, &name, Encoding::Utf8).into()
            };
            writeln!(buf, "{}", uuid.format(format))?;
        }
        _ => {
            for _ in 0..opts.count.unwrap_or(1) {
                writeln!(buf, "{}", uuid1::uuid1().as_uuid().format(format))?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut opts = Options::default();
    while let Some(arg) = args.next() {
        if !arg.starts_with('-') {
            if opts.name.is_some() {
                return Err(format!("unexpected extra name '{}'", arg));
            }
            opts.name = Some(arg);
            continue;
        }
        let flag = match arg.as_str() {
            "-n" | "-f" | "-v" | "-s" => &arg[1..],
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        };
        let Some(value) = args.next() else {
            return Err(format!("argument to option '{}' missing", flag));
        };
        let duplicate = match flag {
            "n" => opts
                .count
                .replace(
                    value
                        .parse()
                        .map_err(|_| format!("invalid argument to option 'n': '{}'", value))?,
                )
                .is_some(),
            "f" => opts
                .format
                .replace(value.parse::<Format>().map_err(|err| {
                    format!("invalid argument to option 'f': '{}' ({})", value, err)
                })?)
                .is_some(),
            "v" => opts
                .version
                .replace(match value.as_str() {
                    "1" => 1,
                    "3" => 3,
                    "5" => 5,
                    _ => return Err(format!("invalid argument to option 'v': '{}'", value)),
                })
                .is_some(),
            _ => opts
                .namespace
                .replace(match value.to_ascii_lowercase().as_str() {
                    "dns" => Uuid::NAMESPACE_DNS,
                    "url" => Uuid::NAMESPACE_URL,
                    "oid" => Uuid::NAMESPACE_OID,
                    "x500" => Uuid::NAMESPACE_X500,
                    _ => Uuid::parse(&value)
                        .map_err(|err| format!("invalid namespace '{}': {}", value, err))?,
                })
                .is_some(),
        };
        if duplicate {
            return Err(format!("option '{}' given more than once", flag));
        }
    }

    match opts.version {
        None | Some(1) if opts.name.is_some() || opts.namespace.is_some() => {
            Err("name and namespace apply to versions 3 and 5 only".to_owned())
        }
        Some(3 | 5) if opts.name.is_none() => Err("name missing".to_owned()),
        Some(3 | 5) if opts.count.is_some() => {
            Err("option 'n' applies to version 1 only".to_owned())
        }
        _ => Ok(opts),
    }
}
