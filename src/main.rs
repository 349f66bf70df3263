use std::io::BufRead;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use secrecy::SecretString;
use tracing::debug;
// 从我们自己的库 `maskpass` 中导入所需的函数和结构体。
use maskpass::{CharCategory, GenerationOptions, PRONOUNCEABLE, derive_options, presets, try_generate};

/// 使用 clap 定义命令行参数的结构体。
#[derive(Parser, Debug)]
#[command(name = "maskpass", version, about)]
struct CliArgs {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate passwords.
    Generate(GenerateArgs),
    /// Print the options that describe an existing password.
    Derive {
        /// The password to analyze; read from a stdin line when omitted.
        password: Option<String>,
    },
    /// List the built-in presets.
    Presets,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Start from a built-in preset (see `maskpass presets`).
    #[arg(long, value_name = "NAME")]
    preset: Option<String>,

    /// Start from an options JSON file.
    // 指定选项的JSON配置文件路径。
    #[arg(short, long, value_name = "FILE_PATH", conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Password length.
    #[arg(short, long)]
    length: Option<usize>,

    /// Pattern mask: X any, A upper, a lower, 1 digit, * special, [ bracket,
    /// Ä high, 0 ambiguous, I include set; anything else is literal.
    #[arg(short, long)]
    pattern: Option<String>,

    /// Extra characters to draw from.
    #[arg(short, long)]
    include: Option<String>,

    /// Enable a character category (repeatable).
    #[arg(long = "with", value_name = "CATEGORY", value_parser = parse_category)]
    categories: Vec<CharCategory>,

    /// Generate a pronounceable password.
    #[arg(long)]
    pronounceable: bool,

    /// Number of passwords to print.
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,
}

fn parse_category(value: &str) -> Result<CharCategory, String> {
    CharCategory::ALL
        .into_iter()
        .find(|c| c.name().eq_ignore_ascii_case(value))
        .ok_or_else(|| {
            let names: Vec<&str> = CharCategory::ALL.iter().map(|c| c.name()).collect();
            format!("unknown category '{value}', expected one of: {}", names.join(", "))
        })
}

/// Builds the option record: preset or config first, then explicit flags on top.
fn resolve_options(args: GenerateArgs) -> Result<(GenerationOptions, usize), Box<dyn std::error::Error>> {
    let mut opts = match (&args.preset, &args.config) {
        (Some(name), _) => presets::find(name)?,
        (None, Some(path)) => {
            // 读取配置文件内容。
            let json = std::fs::read_to_string(path).map_err(|e| {
                format!("Could not read config file '{}': {}", path.display(), e)
            })?;
            GenerationOptions::from_json(&json)?
        }
        (None, None) if args.categories.is_empty() && args.include.is_none() => {
            presets::find("Default")?
        }
        (None, None) => GenerationOptions::new(16),
    };

    if let Some(length) = args.length {
        opts.length = length;
    }
    if let Some(pattern) = args.pattern {
        opts.pattern = Some(pattern);
    }
    if let Some(include) = args.include {
        opts.include = Some(include);
    }
    for category in args.categories {
        opts.flags.insert(category);
    }
    if args.pronounceable {
        opts.name = Some(PRONOUNCEABLE.to_string());
    }
    Ok((opts, args.count))
}

/// 运行程序并处理主要逻辑，返回 Result 类型以便于错误处理。
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    match args.cmd {
        Command::Generate(generate) => {
            let (opts, count) = resolve_options(generate)?;
            debug!(length = opts.length, count, "generating");
            for _ in 0..count {
                println!("{}", try_generate(&opts)?);
            }
        }
        Command::Derive { password } => {
            let password: SecretString = match password {
                Some(password) => password.into(),
                None => {
                    let mut line = String::new();
                    std::io::stdin().lock().read_line(&mut line)?;
                    line.trim_end_matches(['\r', '\n']).to_string().into()
                }
            };
            let opts = derive_options(Some(&password));
            println!("{}", serde_json::to_string_pretty(&opts)?);
        }
        Command::Presets => {
            println!("{}", serde_json::to_string_pretty(&presets::builtin())?);
        }
    }
    Ok(())
}

/// 程序入口。
fn main() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "maskpass=warn".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    // 执行 run 函数并处理可能发生的任何错误。
    if let Err(e) = run() {
        // 失败时，将错误信息打印到标准错误输出，并以非零状态码退出。
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
