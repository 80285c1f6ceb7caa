use std::{env, fs, path::PathBuf};

fn fetch_args(cmd: clap::Command) -> clap::Command {
    cmd.arg(clap::arg!(--wait <SECS> "Seconds to wait after each fetch").default_value("1"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(clap::arg!(--max_pages <NUM> "Stop after this many pages"))
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let crawl = fetch_args(
        clap::Command::new("crawl")
            .about("Download every HTML page below a seed URL (all presets when no seed is given)")
            .arg(clap::arg!(--seed <URL> "Starting URL; only links below it are followed"))
            .arg(clap::arg!(--domain <HOST> "Host links must match (default: the seed's host)"))
            .arg(
                clap::arg!(-o --output <DIR> "Directory the mirror is written under")
                    .value_parser(clap::value_parser!(std::path::PathBuf)),
            )
            .arg(clap::arg!(--preset <NAME> "Run a single built-in preset").value_parser(["gas", "gemini"])),
    );

    let extract = clap::Command::new("extract")
        .about("Convert saved HTML pages into flat plain-text files")
        .arg(clap::arg!([INPUT] "Directory of saved HTML pages").value_parser(clap::value_parser!(std::path::PathBuf)))
        .arg(clap::arg!([OUTPUT] "Directory for the text files").value_parser(clap::value_parser!(std::path::PathBuf)))
        .arg(clap::arg!(--selector <CSS> "CSS selector of the content node").default_value("div.devsite-article-body"))
        .arg(clap::arg!(--preset <NAME> "Run a single built-in preset").value_parser(["gas", "gemini"]));

    let mirror = fetch_args(
        clap::Command::new("mirror")
            .about("Crawl and then extract the built-in presets")
            .arg(clap::arg!(--preset <NAME> "Run a single built-in preset").value_parser(["gas", "gemini"]))
            .arg(
                clap::arg!(--selector <CSS> "CSS selector of the content node")
                    .default_value("div.devsite-article-body"),
            ),
    );

    let mut cmd = clap::Command::new("docmirror")
        .version(env!("CARGO_PKG_VERSION"))
        .author("docmirror Contributors")
        .about("Mirror documentation sites and extract their article text")
        .arg(clap::arg!(-v --verbose "Enable debug logging").global(true))
        .arg(clap::arg!(--json "Print run reports as JSON on stdout").global(true))
        .subcommand(crawl)
        .subcommand(extract)
        .subcommand(mirror)
        .subcommand(clap::Command::new("presets").about("List the built-in presets"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "docmirror", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "docmirror", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "docmirror", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "docmirror", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
