use clap::{Arg, ArgAction, Command, ValueHint};
use std::path::PathBuf;

/// CLI arguments for kinship-server
#[derive(Debug, Clone)]
pub struct CliArgs {
    pub port: Option<u16>,
    pub enable_auth: Option<bool>,
    pub jwt_secret: Option<String>,
    pub jwt_expiration_hours: Option<u64>,
    pub config_file: Option<PathBuf>,
    pub max_request_size: Option<usize>,
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Parse command line arguments
    pub fn parse() -> Self {
        let matches = Command::new("kinship-server")
            .version(kinship::VERSION)
            .author("Kinship Contributors")
            .about("HTTP API server for the Kinship relationship registry")
            .long_about(
                r#"Kinship Server provides a REST API for the Kinship relationship
registry. Members and the kinship edges between them are persisted in
SurrealDB, and every declared relationship is kept consistent with its
inverse edge across updates, approvals, and deletions.

The server can be configured through command line arguments or environment
variables. Command line arguments take precedence over environment variables.

Examples:
  kinship-server --port 8080 --enable-auth
  kinship-server --config kinship.toml --no-auth
  kinship-server --log-level debug"#,
            )
            .arg(
                Arg::new("port")
                    .short('p')
                    .long("port")
                    .value_name("PORT")
                    .help("Port to listen on")
                    .long_help(
                        "Port number for the HTTP server to listen on.
Environment variable: KINSHIP_PORT",
                    )
                    .value_hint(ValueHint::Other)
                    .value_parser(clap::value_parser!(u16)),
            )
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path")
                    .long_help(
                        "Path to the registry configuration file (toml, yaml, or json).
The file is merged with environment variables and CLI arguments.
Environment variable: KINSHIP_CONFIG_FILE",
                    )
                    .value_hint(ValueHint::FilePath)
                    .value_parser(clap::value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("enable_auth")
                    .long("enable-auth")
                    .help("Enable authentication")
                    .long_help(
                        "Require JWT bearer tokens on API endpoints. Tokens are
issued by an external identity provider and verified with the shared secret.
Environment variable: KINSHIP_ENABLE_AUTH",
                    )
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("no_auth")
                    .long("no-auth")
                    .help("Disable authentication")
                    .long_help(
                        "Disable authentication entirely. All API endpoints
will be accessible without tokens and requests act with administrative
rights. WARNING: Only use this in development or trusted environments.",
                    )
                    .action(ArgAction::SetTrue)
                    .conflicts_with("enable_auth"),
            )
            .arg(
                Arg::new("jwt_secret")
                    .long("jwt-secret")
                    .value_name("SECRET")
                    .help("JWT verification secret")
                    .long_help(
                        "Secret key used to verify JWT tokens. Must match the
secret the identity provider signs with. If not provided, a random one is
generated (tokens from outside will not verify).
Environment variable: KINSHIP_JWT_SECRET",
                    )
                    .value_hint(ValueHint::Other),
            )
            .arg(
                Arg::new("jwt_expiration")
                    .long("jwt-expiration")
                    .value_name("HOURS")
                    .help("JWT token expiration time in hours")
                    .long_help(
                        "How long locally issued JWT tokens remain valid.
Default is 24 hours.
Environment variable: KINSHIP_JWT_EXPIRATION_HOURS",
                    )
                    .value_parser(clap::value_parser!(u64)),
            )
            .arg(
                Arg::new("max_request_size")
                    .long("max-request-size")
                    .value_name("BYTES")
                    .help("Maximum request body size in bytes")
                    .long_help(
                        "Maximum size allowed for HTTP request bodies.
Larger requests will be rejected.
Environment variable: KINSHIP_MAX_REQUEST_SIZE",
                    )
                    .value_parser(clap::value_parser!(usize)),
            )
            .arg(
                Arg::new("log_level")
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Logging level")
                    .long_help(
                        "Set the logging level. Valid values: error, warn, info, debug, trace
Environment variable: RUST_LOG",
                    )
                    .value_parser(["error", "warn", "info", "debug", "trace"]),
            )
            .arg(
                Arg::new("help_env")
                    .long("help-env")
                    .help("Show all environment variables")
                    .long_help(
                        "Display a comprehensive list of all environment variables
that can be used to configure the server.",
                    )
                    .action(ArgAction::SetTrue),
            )
            .get_matches();

        if matches.get_flag("help_env") {
            Self::print_env_help();
            std::process::exit(0);
        }

        Self {
            port: matches.get_one::<u16>("port").copied(),
            enable_auth: if matches.get_flag("enable_auth") {
                Some(true)
            } else if matches.get_flag("no_auth") {
                Some(false)
            } else {
                None
            },
            jwt_secret: matches.get_one::<String>("jwt_secret").cloned(),
            jwt_expiration_hours: matches.get_one::<u64>("jwt_expiration").copied(),
            config_file: matches.get_one::<PathBuf>("config").cloned(),
            max_request_size: matches.get_one::<usize>("max_request_size").copied(),
            log_level: matches.get_one::<String>("log_level").cloned(),
        }
    }

    /// Print comprehensive environment variable help
    fn print_env_help() {
        println!("Kinship Server Environment Variables");
        println!("=====================================");
        println!();
        println!("Server Configuration:");
        println!("  KINSHIP_PORT                  - Server port (default: 3000)");
        println!("  KINSHIP_MAX_REQUEST_SIZE      - Max request body size in bytes (default: 16MB)");
        println!("  KINSHIP_CONFIG_FILE           - Path to config file (default: config.json)");
        println!();
        println!("Authentication:");
        println!("  KINSHIP_ENABLE_AUTH           - Enable authentication (default: true)");
        println!("  KINSHIP_JWT_SECRET            - JWT verification secret (auto-generated if not set)");
        println!("  KINSHIP_JWT_EXPIRATION_HOURS  - JWT expiration in hours (default: 24)");
        println!();
        println!("SurrealDB Configuration (shared with the kinship library):");
        println!("  SURREALDB_URL                 - SurrealDB endpoint URL");
        println!("  SURREALDB_NAMESPACE           - SurrealDB namespace (default: kinship)");
        println!("  SURREALDB_DATABASE            - SurrealDB database (default: main)");
        println!("  SURREALDB_USERNAME            - SurrealDB username");
        println!("  SURREALDB_PASSWORD            - SurrealDB password");
        println!();
        println!("Logging:");
        println!("  RUST_LOG                      - Logging level (error, warn, info, debug, trace)");
        println!();
        println!("Note: Command line arguments take precedence over environment variables.");
        println!("Use --help for CLI argument documentation.");
    }
}
