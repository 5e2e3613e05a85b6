use clap::{App, AppSettings, Arg, SubCommand};

pub const DEFAULT_SERVER: &str = "http://localhost:8080";

fn source_arg() -> Arg<'static, 'static> {
    Arg::with_name("source")
        .help("name or link of the media source to select")
        .index(1)
}

pub fn build_app() -> App<'static, 'static> {
    App::new("home-radio-remote")
        .version("1.0.0")
        .author("Rene Richter")
        .about("controls a home-radio server")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("server")
                .long("server")
                .short("s")
                .takes_value(true)
                .env("HOME_RADIO_URL")
                .default_value(DEFAULT_SERVER),
        )
        .arg(
            Arg::with_name("verbose")
                .long("verbose")
                .short("v")
                .takes_value(false),
        )
        .subcommand(SubCommand::with_name("list").about("list media sources"))
        .subcommand(
            SubCommand::with_name("play")
                .about("start playback")
                .arg(source_arg()),
        )
        .subcommand(SubCommand::with_name("stop").about("stop playback"))
        .subcommand(
            SubCommand::with_name("toggle")
                .about("start or stop playback")
                .arg(source_arg()),
        )
        .subcommand(
            SubCommand::with_name("volume")
                .about("show or set the volume")
                .arg(Arg::with_name("level").index(1)),
        )
        .subcommand(SubCommand::with_name("louder").about("raise the volume one step"))
        .subcommand(SubCommand::with_name("quieter").about("lower the volume one step"))
        .subcommand(
            SubCommand::with_name("add")
                .about("register a media source")
                .arg(
                    Arg::with_name("name")
                        .long("name")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::with_name("url")
                        .long("url")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::with_name("type")
                        .long("type")
                        .takes_value(true)
                        .possible_values(&["stream", "radio", "youtube"])
                        .case_insensitive(true)
                        .default_value("stream"),
                ),
        )
        .subcommand(SubCommand::with_name("console").about("interactive remote"))
}
