use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default())
}

fn verbose() -> Arg {
    Arg::new("verbose")
        .help("Increase log verbosity (-v debug, -vv trace), RUST_LOG takes precedence")
        .long("verbose")
        .short('v')
        .action(ArgAction::Count)
}

fn format() -> Arg {
    Arg::new("format")
        .default_value("text")
        .env("DBREADY_FORMAT")
        .help("Report format")
        .long("format")
        .short('f')
        .value_name("FORMAT")
        .value_parser(["text", "json"])
}

/// Pure clap command definitions with zero business logic
///
/// `source` and `dest` are not marked required here, `dispatch` reports them
/// as configuration errors instead.
#[must_use]
pub fn new() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles())
        .arg(
            Arg::new("source")
                .env("DBREADY_SOURCE")
                .help("Source database connection string (required)")
                .long("source")
                .long_help(
                    "Source database connection string (required).\n\n\
                    Accepted forms:\n\
                    - postgres://<user>:<password>@<host>:<port>/<database>?sslmode=<mode>\n\
                    - postgres://<user>:<password>@tcp(<host>:<port>)/<database>?sslmode=<mode>\n\
                    - host=<host> port=<port> user=<user> password=<password> dbname=<database> sslmode=<mode>\n\n\
                    sslmode: disable, allow, prefer (default), require, verify-ca, verify-full"
                )
                .short('s')
                .value_name("CONNECTION"),
        )
        .arg(
            Arg::new("dest")
                .env("DBREADY_DEST")
                .help("Destination database connection string (required)")
                .long("dest")
                .short('d')
                .value_name("CONNECTION"),
        )
        .arg(
            Arg::new("interval")
                .default_value("1000")
                .env("DBREADY_INTERVAL")
                .help("number of milliseconds between readiness checks")
                .long("interval")
                .short('i')
                .value_name("MS")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("timeout")
                .default_value("5")
                .env("DBREADY_TIMEOUT")
                .help("number of seconds to wait for each database")
                .long("timeout")
                .short('t')
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(format())
        .arg(verbose())
}

/// `dbping` takes no connection flags, it always checks the local default database
#[must_use]
pub fn ping() -> Command {
    Command::new("dbping")
        .about("check that the local PostgreSQL database answers and print its version")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles())
        .arg(format())
        .arg(verbose())
}
