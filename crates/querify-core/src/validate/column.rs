/// Excel-style column letter for a 0-based column index: `0 → A`,
/// `25 → Z`, `26 → AA`, `701 → ZZ`, `702 → AAA`.
#[must_use]
pub fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;

    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + u8::try_from(rem).unwrap_or(0));
        n = (n - 1) / 26;
    }

    letters.iter().rev().map(|&b| char::from(b)).collect()
}
