use std::{fs::File, path::PathBuf};

use anyhow::{bail, Result};
use structopt::StructOpt;

use cppfront::codegen::gen::Codegen;
use cppfront::driver::{compile, validate};
use cppfront::emitter::emit::Emit;
use cppfront::ir::gen::lower;
use cppfront::lexer::lex::tokenize;
use cppfront::parser::pattern::parse;
use cppfront::semantics::analyzer::analyze;
use cppfront::accepted_extension;

fn main() {
    let opts = Opt::from_args();

    let mut logger = env_logger::Builder::from_default_env();
    if opts.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    if let Err(e) = run(&opts) {
        eprintln!("cppfront: {}", e);
        std::process::exit(1);
    }
}

fn run(opts: &Opt) -> Result<()> {
    if !accepted_extension(&opts.path) {
        bail!("Please upload a C++ file (.cpp, .cxx, .cc)");
    }

    let src = std::fs::read_to_string(&opts.path)?;

    if opts.lex {
        for token in tokenize(&src) {
            println!("{:>4} {:<12} {}", token.line, format!("{:?}", token.kind), token.value);
        }
        std::process::exit(0);
    }

    if opts.validate {
        for diagnostic in validate(&src) {
            println!("{}", diagnostic);
        }
        std::process::exit(0);
    }

    if opts.parse {
        println!("{:#?}", parse(&src)?);
        std::process::exit(0);
    }

    if opts.semantic {
        println!("{:#?}", analyze(&parse(&src)?, &src));
        std::process::exit(0);
    }

    if opts.ir {
        println!("{}", lower(&parse(&src)?));
        std::process::exit(0);
    }

    if opts.asm {
        parse(&src)?.codegen().emit(&mut std::io::stdout())?;
        std::process::exit(0);
    }

    let result = compile(&src);

    if let Some(ref out) = opts.output {
        if result.success {
            result.write_target(&mut File::create(out)?)?;
        } else {
            log::warn!("compile failed, not writing {}", out.display());
        }
    }

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result);
    }

    if !result.success {
        std::process::exit(1);
    }

    Ok(())
}

#[derive(Debug, StructOpt)]
#[structopt(name = "cppfront", about = "Front end for a small C++ subset")]
struct Opt {
    path: PathBuf,

    #[structopt(name = "lex", long)]
    lex: bool,

    #[structopt(name = "parse", long)]
    parse: bool,

    #[structopt(name = "validate", long)]
    validate: bool,

    #[structopt(name = "semantic", long)]
    semantic: bool,

    #[structopt(name = "ir", long)]
    ir: bool,

    #[structopt(name = "asm", long)]
    asm: bool,

    #[structopt(name = "json", long)]
    json: bool,

    #[structopt(name = "output", short = "o", parse(from_os_str))]
    output: Option<PathBuf>,

    #[structopt(short, long)]
    verbose: bool,
}
