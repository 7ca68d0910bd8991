/// Trim and keep only ASCII alphanumerics, `:`, `,`, `-` and whitespace.
pub fn sanitize_input(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ':' | ',' | '-') || c.is_whitespace())
        .collect()
}
