// This software is released under the MIT license.
// See file LICENSE for full license details.

/// Render a command the way it would be typed in a shell, for logging.
/// Arguments containing whitespace are single-quoted.
pub fn command_to_string(cmd: &std::process::Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|arg| {
            let arg = arg.to_string_lossy();
            if arg.chars().any(char::is_whitespace) {
                format!("'{}'", arg)
            } else {
                arg.into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
