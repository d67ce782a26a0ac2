/**
 * Angular AOT host - ngc-paths
 *
 * Inspect emit paths, import specifiers and metadata of a project
 */
use std::path::Path;
use std::process;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Context;
use clap::{Arg, ArgMatches, Command};

use angular_aot_host::config::{discover_root_files, TsConfig};
use angular_aot_host::ngtsc::file_system::{dirname, AbsoluteFsPath, NodeJSFileSystem};
use angular_aot_host::ngtsc::logging::{ConsoleLogger, LogLevel};
use angular_aot_host::transformers::{AotCompilerHost, InMemoryProgram};
use angular_aot_host::version::version_string;

fn cli() -> Command {
    Command::new("ngc-paths")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect how the AOT host maps a project")
        .subcommand_required(true)
        .arg(
            Arg::new("project")
                .short('p')
                .long("project")
                .value_name("PATH")
                .default_value("tsconfig.json")
                .global(true)
                .help("Path to tsconfig.json"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .default_value("info")
                .global(true)
                .help("debug, info, warn or error"),
        )
        .subcommand(
            Command::new("emit-path")
                .about("Where the generated counterpart of a file is written")
                .arg(Arg::new("file").required(true)),
        )
        .subcommand(
            Command::new("module-name")
                .about("Specifier a generated file uses to import another file")
                .arg(Arg::new("imported").required(true))
                .arg(Arg::new("containing").required(true)),
        )
        .subcommand(
            Command::new("resolve")
                .about("Resolve an import specifier to a file")
                .arg(Arg::new("specifier").required(true))
                .arg(
                    Arg::new("from")
                        .long("from")
                        .value_name("FILE")
                        .help("Containing file"),
                ),
        )
        .subcommand(
            Command::new("metadata")
                .about("Print the version 3 metadata of a file")
                .arg(Arg::new("file").required(true)),
        )
        .subcommand(Command::new("symbols").about("List the static symbols of the program"))
}

fn main() {
    let matches = cli().get_matches();
    if let Err(err) = run(&matches) {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let Some((command, sub)) = matches.subcommand() else {
        anyhow::bail!("Missing subcommand");
    };
    // Global arguments are propagated into the subcommand's matches.
    let project = arg(sub, "project")?;
    let level: LogLevel = arg(sub, "log-level")?
        .parse()
        .map_err(anyhow::Error::msg)?;
    let host = load_host(Path::new(project), level)?;

    match command {
        "emit-path" => {
            let file = absolute(arg(sub, "file")?)?;
            println!("{}", host.calculate_emit_path(&file));
        }
        "module-name" => {
            let imported = absolute(arg(sub, "imported")?)?;
            let containing = absolute(arg(sub, "containing")?)?;
            println!("{}", host.file_name_to_module_name(&imported, &containing));
        }
        "resolve" => {
            let from = sub
                .get_one::<String>("from")
                .map(|f| absolute(f.as_str()))
                .transpose()?;
            match host.module_name_to_file_name(arg(sub, "specifier")?, from.as_deref())? {
                Some(resolved) => println!("{}", resolved),
                None => anyhow::bail!("Cannot resolve {}", arg(sub, "specifier")?),
            }
        }
        "metadata" => {
            let file = absolute(arg(sub, "file")?)?;
            let records = host
                .get_metadata_for(&file)?
                .with_context(|| format!("{} does not exist", file))?;
            match records.iter().max_by_key(|m| m.version) {
                Some(module) => println!("{}", serde_json::to_string_pretty(module)?),
                None => println!("null"),
            }
        }
        "symbols" => {
            let symbols = angular_aot_host::codegen::extract_program_symbols(
                host.program().as_ref(),
                host.metadata_store(),
                host.specifiers(),
                host.path_config(),
                host.logger().as_ref(),
            )?;
            for symbol in symbols {
                println!("{}#{}", symbol.file_path, symbol.name);
            }
        }
        other => anyhow::bail!("Unknown subcommand {}", other),
    }
    Ok(())
}

fn load_host(project: &Path, level: LogLevel) -> anyhow::Result<AotCompilerHost> {
    let project = absolute(&project.to_string_lossy())?;
    let config = TsConfig::load(Path::new(&project))?;
    let config_dir = dirname(&project);
    let options = config.aot_options(&config_dir);
    let root_files = discover_root_files(&config, &config_dir)?;

    let fs = Arc::new(NodeJSFileSystem::new());
    let program = InMemoryProgram::from_file_system(fs.as_ref(), &root_files)?;
    let logger = Rc::new(ConsoleLogger::new(level));
    if level == LogLevel::Debug {
        eprintln!("{}", version_string());
    }
    Ok(AotCompilerHost::new(Rc::new(program), options, fs, logger)?)
}

fn arg<'a>(matches: &'a ArgMatches, name: &str) -> anyhow::Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("Missing argument {}", name))
}

fn absolute(path: &str) -> anyhow::Result<String> {
    let path = Path::new(path);
    if path.is_absolute() {
        return Ok(AbsoluteFsPath::from(path).into_string());
    }
    let cwd = std::env::current_dir().context("Cannot read the current directory")?;
    Ok(AbsoluteFsPath::from(cwd.join(path)).into_string())
}
