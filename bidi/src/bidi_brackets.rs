//! Paired bracket data (Bidi_Paired_Bracket and Bidi_Paired_Bracket_Type)
//! from the UCD file BidiBrackets.txt, used to identify bracket pairs (BD16).

/// Each entry is an (opening, closing) pair, sorted by the opening bracket.
const BRACKET_PAIRS: &[(char, char)] = &[
    ('\u{28}', '\u{29}'), // LEFT PARENTHESIS
    ('\u{5b}', '\u{5d}'), // LEFT SQUARE BRACKET
    ('\u{7b}', '\u{7d}'), // LEFT CURLY BRACKET
    ('\u{f3a}', '\u{f3b}'), // TIBETAN MARK GUG RTAGS GYON
    ('\u{f3c}', '\u{f3d}'), // TIBETAN MARK ANG KHANG GYON
    ('\u{169b}', '\u{169c}'), // OGHAM FEATHER MARK
    ('\u{2045}', '\u{2046}'), // LEFT SQUARE BRACKET WITH QUILL
    ('\u{207d}', '\u{207e}'), // SUPERSCRIPT LEFT PARENTHESIS
    ('\u{208d}', '\u{208e}'), // SUBSCRIPT LEFT PARENTHESIS
    ('\u{2308}', '\u{2309}'), // LEFT CEILING
    ('\u{230a}', '\u{230b}'), // LEFT FLOOR
    ('\u{2329}', '\u{232a}'), // LEFT-POINTING ANGLE BRACKET
    ('\u{2768}', '\u{2769}'), // MEDIUM LEFT PARENTHESIS ORNAMENT
    ('\u{276a}', '\u{276b}'), // MEDIUM FLATTENED LEFT PARENTHESIS ORNAMENT
    ('\u{276c}', '\u{276d}'), // MEDIUM LEFT-POINTING ANGLE BRACKET ORNAMENT
    ('\u{276e}', '\u{276f}'), // HEAVY LEFT-POINTING ANGLE QUOTATION MARK ORNAMENT
    ('\u{2770}', '\u{2771}'), // HEAVY LEFT-POINTING ANGLE BRACKET ORNAMENT
    ('\u{2772}', '\u{2773}'), // LIGHT LEFT TORTOISE SHELL BRACKET ORNAMENT
    ('\u{2774}', '\u{2775}'), // MEDIUM LEFT CURLY BRACKET ORNAMENT
    ('\u{27c5}', '\u{27c6}'), // LEFT S-SHAPED BAG DELIMITER
    ('\u{27e6}', '\u{27e7}'), // MATHEMATICAL LEFT WHITE SQUARE BRACKET
    ('\u{27e8}', '\u{27e9}'), // MATHEMATICAL LEFT ANGLE BRACKET
    ('\u{27ea}', '\u{27eb}'), // MATHEMATICAL LEFT DOUBLE ANGLE BRACKET
    ('\u{27ec}', '\u{27ed}'), // MATHEMATICAL LEFT WHITE TORTOISE SHELL BRACKET
    ('\u{27ee}', '\u{27ef}'), // MATHEMATICAL LEFT FLATTENED PARENTHESIS
    ('\u{2983}', '\u{2984}'), // LEFT WHITE CURLY BRACKET
    ('\u{2985}', '\u{2986}'), // LEFT WHITE PARENTHESIS
    ('\u{2987}', '\u{2988}'), // Z NOTATION LEFT IMAGE BRACKET
    ('\u{2989}', '\u{298a}'), // Z NOTATION LEFT BINDING BRACKET
    ('\u{298b}', '\u{298c}'), // LEFT SQUARE BRACKET WITH UNDERBAR
    ('\u{298d}', '\u{2990}'), // LEFT SQUARE BRACKET WITH TICK IN TOP CORNER
    ('\u{298f}', '\u{298e}'), // LEFT SQUARE BRACKET WITH TICK IN BOTTOM CORNER
    ('\u{2991}', '\u{2992}'), // LEFT ANGLE BRACKET WITH DOT
    ('\u{2993}', '\u{2994}'), // LEFT ARC LESS-THAN BRACKET
    ('\u{2995}', '\u{2996}'), // DOUBLE LEFT ARC GREATER-THAN BRACKET
    ('\u{2997}', '\u{2998}'), // LEFT BLACK TORTOISE SHELL BRACKET
    ('\u{29d8}', '\u{29d9}'), // LEFT WIGGLY FENCE
    ('\u{29da}', '\u{29db}'), // LEFT DOUBLE WIGGLY FENCE
    ('\u{29fc}', '\u{29fd}'), // LEFT-POINTING CURVED ANGLE BRACKET
    ('\u{2e22}', '\u{2e23}'), // TOP LEFT HALF BRACKET
    ('\u{2e24}', '\u{2e25}'), // BOTTOM LEFT HALF BRACKET
    ('\u{2e26}', '\u{2e27}'), // LEFT SIDEWAYS U BRACKET
    ('\u{2e28}', '\u{2e29}'), // LEFT DOUBLE PARENTHESIS
    ('\u{2e55}', '\u{2e56}'), // LEFT SQUARE BRACKET WITH STROKE
    ('\u{2e57}', '\u{2e58}'), // LEFT SQUARE BRACKET WITH DOUBLE STROKE
    ('\u{2e59}', '\u{2e5a}'), // TOP HALF LEFT PARENTHESIS
    ('\u{2e5b}', '\u{2e5c}'), // BOTTOM HALF LEFT PARENTHESIS
    ('\u{3008}', '\u{3009}'), // LEFT ANGLE BRACKET
    ('\u{300a}', '\u{300b}'), // LEFT DOUBLE ANGLE BRACKET
    ('\u{300c}', '\u{300d}'), // LEFT CORNER BRACKET
    ('\u{300e}', '\u{300f}'), // LEFT WHITE CORNER BRACKET
    ('\u{3010}', '\u{3011}'), // LEFT BLACK LENTICULAR BRACKET
    ('\u{3014}', '\u{3015}'), // LEFT TORTOISE SHELL BRACKET
    ('\u{3016}', '\u{3017}'), // LEFT WHITE LENTICULAR BRACKET
    ('\u{3018}', '\u{3019}'), // LEFT WHITE TORTOISE SHELL BRACKET
    ('\u{301a}', '\u{301b}'), // LEFT WHITE SQUARE BRACKET
    ('\u{fe59}', '\u{fe5a}'), // SMALL LEFT PARENTHESIS
    ('\u{fe5b}', '\u{fe5c}'), // SMALL LEFT CURLY BRACKET
    ('\u{fe5d}', '\u{fe5e}'), // SMALL LEFT TORTOISE SHELL BRACKET
    ('\u{ff08}', '\u{ff09}'), // FULLWIDTH LEFT PARENTHESIS
    ('\u{ff3b}', '\u{ff3d}'), // FULLWIDTH LEFT SQUARE BRACKET
    ('\u{ff5b}', '\u{ff5d}'), // FULLWIDTH LEFT CURLY BRACKET
    ('\u{ff5f}', '\u{ff60}'), // FULLWIDTH LEFT WHITE PARENTHESIS
    ('\u{ff62}', '\u{ff63}'), // HALFWIDTH LEFT CORNER BRACKET
];

/// Brackets whose canonical decomposition is another bracket.
/// These are the only singleton decompositions among the paired
/// brackets, so full normalization is not required to match them.
const CANONICAL_BRACKETS: &[(char, char)] = &[
    ('\u{2329}', '\u{3008}'), // LEFT-POINTING ANGLE BRACKET
    ('\u{232a}', '\u{3009}'), // RIGHT-POINTING ANGLE BRACKET
];

/// Returns the closing counterpart if `c` is an opening paired bracket
pub fn opening_to_closing(c: char) -> Option<char> {
    BRACKET_PAIRS
        .binary_search_by_key(&c, |&(open, _)| open)
        .ok()
        .map(|idx| BRACKET_PAIRS[idx].1)
}

/// Returns the opening counterpart if `c` is a closing paired bracket
pub fn closing_to_opening(c: char) -> Option<char> {
    BRACKET_PAIRS
        .iter()
        .find(|&&(_, close)| close == c)
        .map(|&(open, _)| open)
}

/// Maps a bracket to its canonical equivalent, or returns it unchanged
pub fn canonical_bracket(c: char) -> char {
    CANONICAL_BRACKETS
        .iter()
        .find(|&&(from, _)| from == c)
        .map(|&(_, to)| to)
        .unwrap_or(c)
}
