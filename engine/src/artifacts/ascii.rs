//! ASCII folding for artifact bodies
//!
//! Every artifact is passed through [`fold_to_ascii`] exactly once,
//! immediately before its bytes are fixed. Accented Latin letters fold
//! to their base letter (including n-tilde), typographic punctuation
//! folds to its ASCII form, and anything else outside ASCII is dropped.

/// Fold a string to plain ASCII. The output contains only bytes < 128.
pub fn fold_to_ascii(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => out.push('a'),
            'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => out.push('A'),
            'é' | 'è' | 'ê' | 'ë' => out.push('e'),
            'É' | 'È' | 'Ê' | 'Ë' => out.push('E'),
            'í' | 'ì' | 'î' | 'ï' => out.push('i'),
            'Í' | 'Ì' | 'Î' | 'Ï' => out.push('I'),
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' => out.push('o'),
            'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => out.push('O'),
            'ú' | 'ù' | 'û' | 'ü' => out.push('u'),
            'Ú' | 'Ù' | 'Û' | 'Ü' => out.push('U'),
            'ñ' => out.push('n'),
            'Ñ' => out.push('N'),
            'ç' => out.push('c'),
            'Ç' => out.push('C'),
            'ý' | 'ÿ' => out.push('y'),
            'Ý' => out.push('Y'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201c}' | '\u{201d}' => out.push('"'),
            '\u{2026}' => out.push_str("..."),
            '\u{00a0}' => out.push(' '),
            // Combining diacritical marks vanish, leaving the base letter.
            '\u{0300}'..='\u{036f}' => {}
            c if c.is_ascii() => out.push(c),
            _ => {}
        }
    }
    out
}
