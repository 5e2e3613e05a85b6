use clap::ArgMatches;
use env_logger::Env;
use log::{info, LevelFilter};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use home_radio_remote::{
    cli,
    controller::{PlaybackController, PlaybackView},
    errors::RemoteError,
    form,
    request::AwcRequester,
    terminal::{ArgsForm, ConsoleCommand, TerminalView, CONSOLE_HELP},
};

#[actix_web::main]
async fn main() -> Result<(), RemoteError> {
    let matches = cli::build_app().get_matches();

    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    if matches.is_present("verbose") {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let server = matches.value_of("server").unwrap_or(cli::DEFAULT_SERVER);
    info!("using server {}", server);
    let requester = AwcRequester::new(server);

    match matches.subcommand() {
        ("list", Some(_)) => list(requester).await,
        ("play", Some(sub)) => play(requester, sub, false).await,
        ("toggle", Some(sub)) => play(requester, sub, true).await,
        ("stop", Some(_)) => {
            let mut controller = PlaybackController::new(requester);
            controller.stop(&mut TerminalView::default()).await
        }
        ("volume", Some(sub)) => volume(requester, sub).await,
        ("louder", Some(_)) => PlaybackController::new(requester).increase_volume().await,
        ("quieter", Some(_)) => PlaybackController::new(requester).decrease_volume().await,
        ("add", Some(sub)) => add(requester, sub).await,
        ("console", Some(_)) => console(requester).await,
        _ => Ok(()),
    }
}

async fn list(requester: AwcRequester) -> Result<(), RemoteError> {
    let mut controller = PlaybackController::new(requester);
    let mut view = TerminalView::default();
    controller.load(&mut view).await?;
    print!("{}", view.render_sources());
    println!("{}", view.render_status());
    Ok(())
}

async fn play(
    requester: AwcRequester,
    matches: &ArgMatches<'_>,
    toggle: bool,
) -> Result<(), RemoteError> {
    let mut controller = PlaybackController::new(requester);
    let mut view = TerminalView::default();
    controller.load(&mut view).await?;
    if let Some(source) = matches.value_of("source") {
        view.select_by_name(source)?;
    }

    if toggle {
        controller.toggle(&mut view).await?;
    } else {
        controller.start(&mut view).await?;
    }
    println!("{}", view.render_status());
    Ok(())
}

async fn volume(requester: AwcRequester, matches: &ArgMatches<'_>) -> Result<(), RemoteError> {
    let mut controller = PlaybackController::new(requester);
    match matches.value_of("level") {
        Some(level) => {
            let level: u16 = level.parse()?;
            controller.set_volume(level).await?;
            info!("default volume set to {}", level);
        }
        None => {
            let mut view = TerminalView::default();
            controller.load(&mut view).await?;
            if let Some(level) = view.volume() {
                println!("{}", level);
            }
        }
    }
    Ok(())
}

async fn add(requester: AwcRequester, matches: &ArgMatches<'_>) -> Result<(), RemoteError> {
    let mut view = ArgsForm {
        name: matches.value_of("name").unwrap_or_default().to_string(),
        url: matches.value_of("url").unwrap_or_default().to_string(),
        media_type: matches.value_of("type").unwrap_or("stream").to_string(),
    };
    let source = form::add_media_source(&requester, &mut view).await?;
    println!("added {} [{}] {}", source.name, source.media_type, source.link);
    Ok(())
}

async fn console(requester: AwcRequester) -> Result<(), RemoteError> {
    let mut controller = PlaybackController::new(requester);
    let mut view = TerminalView::default();
    controller.load(&mut view).await?;
    print!("{}", view.render_sources());
    println!("{}", view.render_status());

    let mut stdout = io::stdout();
    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<ConsoleCommand>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        let result = match command {
            ConsoleCommand::Quit => break,
            ConsoleCommand::Help => {
                println!("{}", CONSOLE_HELP);
                Ok(())
            }
            ConsoleCommand::List => {
                print!("{}", view.render_sources());
                Ok(())
            }
            ConsoleCommand::Select(n) => view.select_index(n),
            ConsoleCommand::Toggle => controller.toggle(&mut view).await,
            ConsoleCommand::Start => controller.start(&mut view).await,
            ConsoleCommand::Stop => controller.stop(&mut view).await,
            ConsoleCommand::Louder => controller.increase_volume().await,
            ConsoleCommand::Quieter => controller.decrease_volume().await,
            ConsoleCommand::Volume(level) => match controller.set_volume(level).await {
                Ok(()) => {
                    view.set_volume(level);
                    Ok(())
                }
                Err(e) => Err(e),
            },
        };
        match result {
            // playback actions already reported through the view
            Err(RemoteError::Request(_)) | Err(RemoteError::NoSelection)
                if matches!(
                    command,
                    ConsoleCommand::Toggle | ConsoleCommand::Start | ConsoleCommand::Stop
                ) => {}
            Err(e) => eprintln!("error: {}", e),
            Ok(()) => println!("{}", view.render_status()),
        }
    }
    Ok(())
}
