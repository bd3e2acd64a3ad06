use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

// Gateway and HTTP internals are only interesting when they fail.
const NOISY_TARGETS: &[&str] = &["serenity", "hyper", "reqwest", "rustls", "tungstenite", "h2"];

pub fn setup_logger(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);

    let mut dispatch = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(level);

    for target in NOISY_TARGETS {
        dispatch = dispatch.level_for(*target, level.min(LevelFilter::Warn));
    }

    dispatch.chain(std::io::stdout()).apply()
}
