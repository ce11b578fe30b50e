use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use sporldeck::{
    cli, config, error,
    management::FileStore,
    spotify::{
        SpotifyClient,
        library::{DEFAULT_PLAYLIST_LIMIT, DEFAULT_RECENT_LIMIT, DEFAULT_TOP_LIMIT},
    },
    types::TimeRange,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in, check or manage stored tokens
    Auth(AuthOptions),

    /// Show the logged in user
    Me,

    /// Show the currently playing track
    Now,

    /// Control playback on the active device
    Player(PlayerOptions),

    /// List recently played tracks
    Recent(LimitOptions),

    /// List top tracks
    Top(TopOptions),

    /// List playlists
    Playlists(PlaylistsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AuthSubcommand {
    /// Log in through the browser
    Login,

    /// Check whether the stored token is accepted
    Status,

    /// Exchange the refresh token for a new access token
    Refresh,

    /// Store tokens obtained elsewhere
    Import(ImportOpts),

    /// Remove stored tokens
    Logout,
}

#[derive(Parser, Debug, Clone)]
pub struct ImportOpts {
    #[clap(long)]
    pub access_token: String,

    #[clap(long)]
    pub refresh_token: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlayerOptions {
    /// play, pause, next, previous, seek, repeat or shuffle
    pub action: String,

    /// Position in ms for seek, track|context|off for repeat, true|false for shuffle
    pub value: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct LimitOptions {
    #[clap(long, default_value_t = DEFAULT_RECENT_LIMIT)]
    pub limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct TopOptions {
    /// short_term, medium_term or long_term
    #[clap(long, default_value = "medium_term")]
    pub time_range: TimeRange,

    #[clap(long, default_value_t = DEFAULT_TOP_LIMIT)]
    pub limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistsOptions {
    #[clap(long, default_value_t = DEFAULT_PLAYLIST_LIMIT)]
    pub limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let store = match FileStore::open(config::credentials_path()).await {
        Ok(store) => store,
        Err(e) => error!("Cannot open credential store. Err: {}", e),
    };
    let client = SpotifyClient::from_env(Arc::new(store));

    match cli.command {
        Command::Auth(opt) => match opt.command {
            AuthSubcommand::Login => cli::login(&client).await,
            AuthSubcommand::Status => cli::status(&client).await,
            AuthSubcommand::Refresh => cli::refresh(&client).await,
            AuthSubcommand::Import(i) => cli::import(&client, i.access_token, i.refresh_token).await,
            AuthSubcommand::Logout => cli::logout(&client).await,
        },
        Command::Me => cli::me(&client).await,
        Command::Now => cli::now_playing(&client).await,
        Command::Player(opt) => cli::player(&client, opt.action, opt.value).await,
        Command::Recent(opt) => cli::recent(&client, opt.limit).await,
        Command::Top(opt) => cli::top(&client, opt.time_range, opt.limit).await,
        Command::Playlists(opt) => cli::playlists(&client, opt.limit).await,
        Command::Completions(_) => {}
    }
}
