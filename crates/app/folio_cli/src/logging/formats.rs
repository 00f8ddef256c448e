use std::io::Write;

use flexi_logger::{DeferredNow, style};
use log::Record;

/// `LEVEL [target] message`, level coloured when stderr is a terminal.
pub fn cli_format(
    w: &mut dyn Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> std::io::Result<()> {
    let level = record.level();
    write!(
        w,
        "{} [{}] {}",
        style(level).paint(level.to_string()),
        record.module_path().unwrap_or("<unnamed>"),
        record.args()
    )
}
