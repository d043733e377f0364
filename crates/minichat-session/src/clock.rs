/// Local wall-clock label stamped onto transcript messages, e.g. "14:05".
pub(crate) fn time_label() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}
