//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module with the table of tags an animation string can use.
//!
//! Keys are 1 to 3 characters long. The second field says if the tag takes a
//! numeric argument; the third is what we know about it (a lot of tags have
//! never been seen doing anything).

/// This represents one entry of the tag table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagInfo {

    /// The characters of the tag, as they appear on animation strings.
    pub key: &'static str,

    /// If the tag is followed by a numeric argument.
    pub has_arg: bool,

    /// What the tag does, when known.
    pub desc: &'static str,
}

/// Characters that appear on real animation strings without being tags.
///
/// The game skips them, so we keep them as invalid tags when parsing.
pub const FILLER_CHARS: [char; 4] = ['c', 'p', 'o', 'z'];

/// The full tag table.
pub const TAGS: &[TagInfo] = &[
    TagInfo { key: "aa", has_arg: false, desc: "" },
    TagInfo { key: "ab", has_arg: false, desc: "" },
    TagInfo { key: "ac", has_arg: false, desc: "Turn the HAR to face the center of the arena" },
    TagInfo { key: "ad", has_arg: false, desc: "" },
    TagInfo { key: "ae", has_arg: false, desc: "" },
    TagInfo { key: "af", has_arg: false, desc: "Freeze opponent HAR" },
    TagInfo { key: "ag", has_arg: false, desc: "" },
    TagInfo { key: "ai", has_arg: false, desc: "" },
    TagInfo { key: "am", has_arg: false, desc: "Tells the HAR when to stop walking" },
    TagInfo { key: "ao", has_arg: false, desc: "" },
    TagInfo { key: "as", has_arg: false, desc: "Wandering fire pit orb" },
    TagInfo { key: "at", has_arg: false, desc: "Sets object position behind enemy har, used only by chronos' teleport" },
    TagInfo { key: "aw", has_arg: false, desc: "Tells if the HAR can pass through walls" },
    TagInfo { key: "ax", has_arg: false, desc: "" },
    TagInfo { key: "ar", has_arg: false, desc: "Reverse player direction" },
    TagInfo { key: "al", has_arg: false, desc: "" },
    TagInfo { key: "b", has_arg: false, desc: "" },
    TagInfo { key: "b1", has_arg: false, desc: "" },
    TagInfo { key: "b2", has_arg: false, desc: "" },
    TagInfo { key: "bb", has_arg: true, desc: "Vertical screen shake" },
    TagInfo { key: "be", has_arg: false, desc: "Block the end of the round" },
    TagInfo { key: "bf", has_arg: true, desc: "Blend finish" },
    TagInfo { key: "bh", has_arg: false, desc: "" },
    TagInfo { key: "bl", has_arg: true, desc: "Horizontal screen shake with magnitude n" },
    TagInfo { key: "bm", has_arg: true, desc: "Animation to play while doing something" },
    TagInfo { key: "bj", has_arg: true, desc: "Jump to animation <n>" },
    TagInfo { key: "bs", has_arg: true, desc: "Blend start" },
    TagInfo { key: "bu", has_arg: false, desc: "Used by jaguar's destruct to move to center of arena" },
    TagInfo { key: "bw", has_arg: false, desc: "" },
    TagInfo { key: "bx", has_arg: false, desc: "" },
    TagInfo { key: "bpd", has_arg: true, desc: "Reference palette index" },
    TagInfo { key: "bps", has_arg: true, desc: "Start palette index" },
    TagInfo { key: "bpn", has_arg: true, desc: "Palette entry count" },
    TagInfo { key: "bpf", has_arg: false, desc: "Fighter palette selection" },
    TagInfo { key: "bpp", has_arg: true, desc: "Initial and final color level" },
    TagInfo { key: "bpb", has_arg: true, desc: "Initial color level" },
    TagInfo { key: "bpo", has_arg: false, desc: "Disable palette effects" },
    TagInfo { key: "bz", has_arg: false, desc: "Color tint effect" },
    TagInfo { key: "ba", has_arg: true, desc: "Credits fade effect remapping (?)" },
    TagInfo { key: "bc", has_arg: true, desc: "Credits fade effect color count" },
    TagInfo { key: "bd", has_arg: false, desc: "Credits fade effect switch" },
    TagInfo { key: "bg", has_arg: false, desc: "Credits fade effect unknown" },
    TagInfo { key: "bi", has_arg: true, desc: "Credits fade effect color start index" },
    TagInfo { key: "bk", has_arg: true, desc: "" },
    TagInfo { key: "bn", has_arg: false, desc: "" },
    TagInfo { key: "bo", has_arg: true, desc: "" },
    TagInfo { key: "br", has_arg: false, desc: "Draw additively" },
    TagInfo { key: "bt", has_arg: false, desc: "Dark tint, used by shadow HAR" },
    TagInfo { key: "by", has_arg: false, desc: "" },
    TagInfo { key: "cf", has_arg: false, desc: "Only used by shadow scrap, works with 'bm' tag to walk to far corner of arena" },
    TagInfo { key: "cg", has_arg: false, desc: "" },
    TagInfo { key: "cl", has_arg: false, desc: "" },
    TagInfo { key: "cp", has_arg: false, desc: "" },
    TagInfo { key: "cw", has_arg: false, desc: "" },
    TagInfo { key: "cx", has_arg: true, desc: "" },
    TagInfo { key: "cy", has_arg: true, desc: "" },
    TagInfo { key: "d", has_arg: true, desc: "Re-enter animation at N ticks" },
    TagInfo { key: "e", has_arg: false, desc: "Set position to enemy position" },
    TagInfo { key: "f", has_arg: true, desc: "Flip sprite vertically" },
    TagInfo { key: "g", has_arg: false, desc: "Set position to ground and zero velocity" },
    TagInfo { key: "h", has_arg: false, desc: "Set velocity to 0" },
    TagInfo { key: "i", has_arg: false, desc: "" },
    TagInfo { key: "jf2", has_arg: false, desc: "Allow chaining to destruction" },
    TagInfo { key: "jf", has_arg: false, desc: "Allow chaining to scrap" },
    TagInfo { key: "jg", has_arg: false, desc: "Every HAR uses this in the 'getup' animation, purpose unknown, might be 'grab' (like standing throw)?" },
    TagInfo { key: "jh", has_arg: false, desc: "Allow chaining to 'high' moves" },
    TagInfo { key: "jj", has_arg: false, desc: "Allow chaining to airborne moves" },
    TagInfo { key: "jl", has_arg: false, desc: "Allow chaining to 'low' moves" },
    TagInfo { key: "jm", has_arg: false, desc: "Allow chaining to 'mid' moves" },
    TagInfo { key: "jp", has_arg: false, desc: "" },
    TagInfo { key: "jz", has_arg: false, desc: "Allow chaining to anything? (Katana head stomp)" },
    TagInfo { key: "jn", has_arg: true, desc: "Allow frame to chain to animation N" },
    TagInfo { key: "k", has_arg: true, desc: "Knockback on hit" },
    TagInfo { key: "l", has_arg: true, desc: "Sound loudness" },
    TagInfo { key: "ma", has_arg: true, desc: "Sets angle of new object in degrees. Velocity is then x=cos(ma), y=sin(ma)." },
    TagInfo { key: "mc", has_arg: false, desc: "" },
    TagInfo { key: "md", has_arg: true, desc: "Destroy animation N" },
    TagInfo { key: "mg", has_arg: true, desc: "Gravity for spawned animation, default 0" },
    TagInfo { key: "mi", has_arg: true, desc: "" },
    TagInfo { key: "mm", has_arg: true, desc: "Manipulate mrx and mry calculations" },
    TagInfo { key: "mn", has_arg: true, desc: "" },
    TagInfo { key: "mo", has_arg: false, desc: "" },
    TagInfo { key: "mp", has_arg: true, desc: "Feature bitmask" },
    TagInfo { key: "mrx", has_arg: true, desc: "Randomize new animation X" },
    TagInfo { key: "mry", has_arg: true, desc: "Randomize new animation Y" },
    TagInfo { key: "ms", has_arg: false, desc: "Set special Y position for object; y = -4 * (y - 188)" },
    TagInfo { key: "mu", has_arg: true, desc: "" },
    TagInfo { key: "mx", has_arg: true, desc: "X position of new animation" },
    TagInfo { key: "my", has_arg: true, desc: "Y position of new animation" },
    TagInfo { key: "m", has_arg: true, desc: "Create instance of animation N" },
    TagInfo { key: "n", has_arg: false, desc: "Disable collision detection for the current frame" },
    TagInfo { key: "ox", has_arg: true, desc: "Set sprite X correction for this frame" },
    TagInfo { key: "oy", has_arg: true, desc: "Set sprite Y correction for this frame" },
    TagInfo { key: "pa", has_arg: false, desc: "Enable color effect for HAR palette effects" },
    TagInfo { key: "pb", has_arg: true, desc: "N < 512" },
    TagInfo { key: "pc", has_arg: true, desc: "N < 512" },
    TagInfo { key: "pd", has_arg: true, desc: "n < 256. Reference color index." },
    TagInfo { key: "pe", has_arg: false, desc: "Switch HAR palette effect handling to the other HAR." },
    TagInfo { key: "ph", has_arg: false, desc: "Disable HAR palette effects if HAR is not in damage animation (9)" },
    TagInfo { key: "pp", has_arg: true, desc: "Duration of HAR palette effect in ticks." },
    TagInfo { key: "ps", has_arg: false, desc: "Update the color palette" },
    TagInfo { key: "ptd", has_arg: true, desc: "n < 128 Effect intensity." },
    TagInfo { key: "ptp", has_arg: true, desc: "N < 128" },
    TagInfo { key: "ptr", has_arg: true, desc: "N < 128" },
    TagInfo { key: "q", has_arg: true, desc: "Enable hit on current and next n-1 frames." },
    TagInfo { key: "r", has_arg: false, desc: "Flip sprite horizontally" },
    TagInfo { key: "s", has_arg: true, desc: "Play sound N from sound table footer" },
    TagInfo { key: "sa", has_arg: false, desc: "" },
    TagInfo { key: "sb", has_arg: true, desc: "Sound panning start" },
    TagInfo { key: "sc", has_arg: true, desc: "" },
    TagInfo { key: "sd", has_arg: false, desc: "" },
    TagInfo { key: "se", has_arg: true, desc: "Sound panning end 1" },
    TagInfo { key: "sf", has_arg: true, desc: "Sound frequency" },
    TagInfo { key: "sl", has_arg: true, desc: "Sound panning end 2" },
    TagInfo { key: "smf", has_arg: true, desc: "Stop playing music track N" },
    TagInfo { key: "smo", has_arg: true, desc: "Play music track N" },
    TagInfo { key: "sp", has_arg: true, desc: "" },
    TagInfo { key: "sw", has_arg: true, desc: "" },
    TagInfo { key: "t", has_arg: false, desc: "Prevent sound from playing if other HAR is blocking" },
    TagInfo { key: "ua", has_arg: false, desc: "Sets enemy HAR to damage animation, if not already set." },
    TagInfo { key: "ub", has_arg: false, desc: "Motion blur effect" },
    TagInfo { key: "uc", has_arg: false, desc: "" },
    TagInfo { key: "ud", has_arg: false, desc: "" },
    TagInfo { key: "ue", has_arg: false, desc: "Damage enemy if on the ground" },
    TagInfo { key: "uf", has_arg: false, desc: "" },
    TagInfo { key: "ug", has_arg: false, desc: "" },
    TagInfo { key: "uh", has_arg: false, desc: "" },
    TagInfo { key: "uj", has_arg: false, desc: "" },
    TagInfo { key: "ul", has_arg: false, desc: "" },
    TagInfo { key: "un", has_arg: false, desc: "" },
    TagInfo { key: "ur", has_arg: false, desc: "" },
    TagInfo { key: "us", has_arg: false, desc: "" },
    TagInfo { key: "uz", has_arg: false, desc: "" },
    TagInfo { key: "v", has_arg: false, desc: "Velocity modifier for x/y" },
    TagInfo { key: "vsx", has_arg: false, desc: "" },
    TagInfo { key: "vsy", has_arg: false, desc: "" },
    TagInfo { key: "w", has_arg: false, desc: "Sprite caching related ?" },
    TagInfo { key: "x-", has_arg: true, desc: "Set X coordinate to -N" },
    TagInfo { key: "x+", has_arg: true, desc: "Set X coordinate to +N" },
    TagInfo { key: "x=", has_arg: true, desc: "Interpolate X coordinate to N by next frame" },
    TagInfo { key: "x", has_arg: true, desc: "Scale image as % of width (default 100)" },
    TagInfo { key: "y-", has_arg: true, desc: "Set Y coordinate to -N" },
    TagInfo { key: "y+", has_arg: true, desc: "Set Y coordinate to +N" },
    TagInfo { key: "y=", has_arg: true, desc: "Interpolate Y coordinate to N by next frame" },
    TagInfo { key: "y", has_arg: true, desc: "Scale image as % of height (default 100)" },
    TagInfo { key: "zg", has_arg: false, desc: "Never used?" },
    TagInfo { key: "zh", has_arg: false, desc: "Never used?" },
    TagInfo { key: "zj", has_arg: false, desc: "Invulnerable to jumping attacks" },
    TagInfo { key: "zl", has_arg: false, desc: "Never used?" },
    TagInfo { key: "zm", has_arg: false, desc: "Never used?" },
    TagInfo { key: "zp", has_arg: false, desc: "Invulnerable to projectiles" },
    TagInfo { key: "zz", has_arg: false, desc: "Invulnerable to any attacks" },
];

/// This function returns the table entry for the provided key, if it exists.
pub fn tag_info(key: &str) -> Option<&'static TagInfo> {
    TAGS.iter().find(|info| info.key == key)
}

/// This function matches the longest tag at the start of the provided input.
///
/// The input must be ASCII, as animation strings always are.
pub fn match_tag(input: &str) -> Option<&'static TagInfo> {
    for len in (1..=input.len().min(3)).rev() {
        if let Some(info) = tag_info(&input[..len]) {
            return Some(info)
        }
    }

    None
}

/// This function checks if a character is one of the filler characters.
pub fn is_filler(character: char) -> bool {
    FILLER_CHARS.contains(&character)
}
