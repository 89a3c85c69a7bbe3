use bidi_levels::{BidiContext, Direction, ParagraphDirectionHint};

fn main() {
    // Levels are reported per char, so the text is held as a Vec<char>
    // and runs refer to indices into it.
    let text: Vec<char> = "\u{5e9}\u{5dc}\u{5d5}\u{5dd} (hello) world \u{5e2}\u{5d5}\u{5dc}\u{5dd}"
        .chars()
        .collect();

    let mut context = BidiContext::new();

    // Leave it to the algorithm to determine the paragraph direction.
    // If you have some higher level understanding or override for the
    // direction, use LeftToRight or RightToLeft instead.
    let hint = ParagraphDirectionHint::AutoLeftToRight;
    context.resolve(&text, hint);

    println!("base level: {:?}", context.base_level());

    /// A stub shaper interface, which is essentially compatible with
    /// eg: Harfbuzz's buffer data type.
    struct ShaperBuffer {
        text: String,
    }
    impl ShaperBuffer {
        pub fn add_codepoint(&mut self, codepoint: char) {
            self.text.push(codepoint);
        }
        pub fn set_direction(&mut self, direction: Direction) {
            print!("{:?}: ", direction);
        }
        pub fn reset(&mut self) {
            self.text.clear();
        }
        pub fn shape(&mut self) {
            println!("{:?}", self.text);
        }
    }

    let mut buffer = ShaperBuffer {
        text: String::new(),
    };

    // Pretend that the layout engine wrapped the text into two lines
    let wrap = 12;
    for line in [0..wrap, wrap..text.len()] {
        println!("line {:?}", line);
        for run in context.line_runs(line) {
            buffer.reset();
            buffer.set_direction(run.direction);
            for idx in run.indices() {
                buffer.add_codepoint(text[idx]);
            }
            buffer.shape();
        }
    }
}
