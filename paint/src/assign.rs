use keyanim_core::{Colour, Key, PhysicalDisplay};

/// A `NAME=RRGGBB` pair from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub name: String,
    pub colour: Colour,
}

impl Assignment {
    pub fn as_key(&self) -> Key {
        Key::key(self.name.clone())
    }

    pub fn as_group(&self) -> Key {
        Key::group(self.name.clone())
    }
}

pub fn parse_assignment(s: &str) -> Result<Assignment, String> {
    let (name, colour) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=RRGGBB, got `{s}`"))?;
    let name = name.trim();
    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(format!("bad name `{name}`"));
    }
    let colour = colour.trim().parse::<Colour>().map_err(|e| e.to_string())?;
    Ok(Assignment {
        name: name.to_string(),
        colour,
    })
}

/// Group colours used when nothing is given on the command line.
pub fn default_scheme() -> Vec<(Key, Colour)> {
    vec![
        (Key::group("fkeys"), Colour::new(0xff, 0x00, 0x00)),
        (Key::group("keys"), Colour::new(0xff, 0xff, 0xff)),
        (Key::group("modifiers"), Colour::new(0x00, 0xff, 0x00)),
    ]
}

/// Apply groups, then individual keys, so keys override the group they belong to.
/// With no assignments at all the default scheme is painted.
pub fn paint(frame: &mut PhysicalDisplay<'_>, groups: &[Assignment], keys: &[Assignment]) {
    if groups.is_empty() && keys.is_empty() {
        for (key, colour) in default_scheme() {
            frame.light(key, colour);
        }
        return;
    }
    for group in groups {
        frame.light(group.as_group(), group.colour);
    }
    for key in keys {
        frame.light(key.as_key(), key.colour);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyanim_core::PixelMapper;

    #[test]
    fn parses_name_and_colour() {
        let a = parse_assignment("escape=ffbb99").unwrap();
        assert_eq!(a.name, "escape");
        assert_eq!(a.colour, Colour::new(0xff, 0xbb, 0x99));
        assert_eq!(a.as_key(), Key::key("escape"));
        assert!(a.as_group().is_group());
    }

    #[test]
    fn rejects_malformed_pairs() {
        assert!(parse_assignment("escape").is_err());
        assert!(parse_assignment("=ff0000").is_err());
        assert!(parse_assignment("escape=red").is_err());
    }

    #[test]
    fn paints_default_scheme_when_empty() {
        let mapper = PixelMapper::builtin("g810").unwrap();
        let mut frame = PhysicalDisplay::for_mapper(&mapper);
        paint(&mut frame, &[], &[]);
        assert_eq!(
            frame.serialize(),
            "a 000000\ng fkeys ff0000\ng keys ffffff\ng modifiers 00ff00\nc\n"
        );
    }

    #[test]
    fn keys_follow_groups() {
        let mapper = PixelMapper::builtin("g810").unwrap();
        let mut frame = PhysicalDisplay::for_mapper(&mapper);
        let groups = [parse_assignment("keys=0000ff").unwrap()];
        let keys = [parse_assignment("w=ffffff").unwrap()];
        paint(&mut frame, &groups, &keys);
        assert_eq!(frame.serialize(), "a 000000\ng keys 0000ff\nk w ffffff\nc\n");
    }
}
