//! Compiled-in dialect schema definitions.
//!
//! The attribute roster follows the items.xml vocabulary of each server
//! line. Dialects are cumulative: every post-0.3.6 dialect understands the
//! shared base set and adds the keys its server introduced.

use super::{AttributeSchema, AttributeValueType, ItemAttribute, XmlEncoding};

use AttributeValueType::{Boolean, Mixed, Number, String as Str};

const WEAPON_TYPES: &[&str] = &[
    "sword",
    "club",
    "axe",
    "shield",
    "distance",
    "wand",
    "ammunition",
    "quiver",
];

const SLOT_TYPES: &[&str] = &[
    "head",
    "body",
    "legs",
    "feet",
    "backpack",
    "two-handed",
    "right-hand",
    "left-hand",
    "necklace",
    "ring",
    "ammo",
];

const CORPSE_TYPES: &[&str] = &["venom", "blood", "undead", "fire", "energy"];

const FLOOR_CHANGES: &[&str] = &[
    "down",
    "north",
    "south",
    "east",
    "west",
    "northex",
    "southex",
    "eastex",
    "westex",
];

const FLUID_SOURCES: &[&str] = &[
    "water", "blood", "beer", "slime", "lemonade", "milk", "mana", "life", "oil", "urine", "coconutmilk", "wine", "mud", "fruitjuice", "lava", "rum", "swamp", "tea", "mead",
];

const ITEM_TYPES: &[&str] = &[
    "key",
    "magicfield",
    "container",
    "depot",
    "mailbox",
    "trashholder",
    "teleport",
    "door",
    "bed",
    "rune",
];

fn attr(key: &'static str, value_type: AttributeValueType, category: &'static str) -> ItemAttribute {
    ItemAttribute::new(key, value_type, category)
}

/// The attribute set every dialect understands.
fn base_attributes() -> Vec<ItemAttribute> {
    vec![
        // Tag-placement attributes on the <item> element itself.
        attr("article", Str, "General").tag().order(10),
        attr("plural", Str, "General").tag().order(11),
        attr("editorsuffix", Str, "General").tag().order(12),
        // General
        attr("type", Mixed, "General").order(1).values(ITEM_TYPES),
        attr("description", Str, "General").order(2),
        attr("runespellname", Str, "General").order(3),
        attr("weight", Number, "General").order(4),
        attr("showcount", Boolean, "General"),
        attr("rotateto", Number, "General"),
        attr("movable", Boolean, "General"),
        attr("blockprojectile", Boolean, "General"),
        attr("pickupable", Boolean, "General"),
        attr("floorchange", Mixed, "General").values(FLOOR_CHANGES),
        attr("corpsetype", Mixed, "General").values(CORPSE_TYPES),
        attr("containersize", Number, "General"),
        attr("fluidsource", Mixed, "General").values(FLUID_SOURCES),
        attr("replaceable", Boolean, "General"),
        attr("partnerdirection", Mixed, "General").values(&["north", "south", "east", "west"]),
        attr("invisible", Boolean, "General"),
        attr("speed", Number, "General"),
        // Equipment
        attr("slottype", Mixed, "Equipment").values(SLOT_TYPES),
        attr("weapontype", Mixed, "Equipment").values(WEAPON_TYPES),
        attr("shoottype", Str, "Equipment"),
        attr("ammotype", Str, "Equipment"),
        attr("effect", Str, "Equipment"),
        attr("range", Number, "Equipment"),
        attr("ammoaction", Mixed, "Equipment").values(&["move", "moveback", "removecharge", "removecount"]),
        attr("transformequipto", Number, "Equipment"),
        attr("transformdeequipto", Number, "Equipment"),
        attr("leveldoor", Number, "Equipment"),
        attr("malesleeper", Number, "Equipment"),
        attr("femalesleeper", Number, "Equipment"),
        attr("nosleeper", Number, "Equipment"),
        // Combat
        attr("attack", Number, "Combat").order(20),
        attr("defense", Number, "Combat").order(21),
        attr("extradef", Number, "Combat").order(22),
        attr("armor", Number, "Combat").order(23),
        attr("hitchance", Number, "Combat"),
        attr("maxhitchance", Number, "Combat"),
        attr("breakchance", Number, "Combat"),
        attr("elementfire", Number, "Combat"),
        attr("elementenergy", Number, "Combat"),
        attr("elementearth", Number, "Combat"),
        attr("elementice", Number, "Combat"),
        // Protection
        attr("absorbpercentall", Number, "Protection"),
        attr("absorbpercentphysical", Number, "Protection"),
        attr("absorbpercentfire", Number, "Protection"),
        attr("absorbpercentenergy", Number, "Protection"),
        attr("absorbpercentearth", Number, "Protection"),
        attr("absorbpercentice", Number, "Protection"),
        attr("absorbpercentholy", Number, "Protection"),
        attr("absorbpercentdeath", Number, "Protection"),
        attr("suppressdrunk", Boolean, "Protection"),
        attr("suppressenergy", Boolean, "Protection"),
        attr("suppressfire", Boolean, "Protection"),
        attr("suppresspoison", Boolean, "Protection"),
        attr("manashield", Boolean, "Protection"),
        // Skills
        attr("skillsword", Number, "Skills"),
        attr("skillaxe", Number, "Skills"),
        attr("skillclub", Number, "Skills"),
        attr("skilldist", Number, "Skills"),
        attr("skillfist", Number, "Skills"),
        attr("skillfish", Number, "Skills"),
        attr("skillshield", Number, "Skills"),
        attr("magicpoints", Number, "Skills"),
        attr("maxhealthpoints", Number, "Skills"),
        attr("maxmanapoints", Number, "Skills"),
        // Regeneration
        attr("healthgain", Number, "Regeneration"),
        attr("healthticks", Number, "Regeneration"),
        attr("managain", Number, "Regeneration"),
        attr("manaticks", Number, "Regeneration"),
        // Writing
        attr("readable", Boolean, "Writing"),
        attr("writeable", Boolean, "Writing"),
        attr("maxtextlen", Number, "Writing"),
        attr("writeonceitemid", Number, "Writing"),
        // Decay
        attr("decayto", Number, "Decay").order(30),
        attr("duration", Number, "Decay").order(31),
        attr("showduration", Boolean, "Decay"),
        attr("stopduration", Boolean, "Decay"),
        attr("charges", Number, "Decay").order(32),
        attr("showcharges", Boolean, "Decay"),
        attr("showattributes", Boolean, "Decay"),
        // Fields: a nested record, e.g. <attribute key="field" value="fire">
        // with damage/ticks/count children.
        attr("field", Mixed, "Fields")
            .values(&["fire", "energy", "poison"])
            .children(vec![
                attr("damage", Number, "Fields"),
                attr("ticks", Number, "Fields"),
                attr("count", Number, "Fields"),
                attr("start", Number, "Fields"),
            ]),
    ]
}

fn with_extra(mut attrs: Vec<ItemAttribute>, extra: Vec<ItemAttribute>) -> Vec<ItemAttribute> {
    attrs.extend(extra);
    attrs
}

fn tfs_036() -> AttributeSchema {
    AttributeSchema {
        server: "tfs-0.3.6",
        display_name: "TFS 0.3.6",
        supports_from_to_id: true,
        encoding: XmlEncoding::Latin1,
        attributes: with_extra(
            base_attributes(),
            vec![
                attr("forceserialize", Boolean, "General"),
                attr("preventitemloss", Boolean, "Protection"),
                attr("preventskillloss", Boolean, "Protection"),
            ],
        ),
    }
}

fn tfs_10() -> AttributeSchema {
    AttributeSchema {
        server: "tfs-1.0",
        display_name: "TFS 1.0",
        supports_from_to_id: true,
        encoding: XmlEncoding::Utf8,
        attributes: with_extra(base_attributes(), vec![attr("walkstack", Boolean, "General")]),
    }
}

fn tfs_11() -> AttributeSchema {
    AttributeSchema {
        server: "tfs-1.1",
        display_name: "TFS 1.1",
        supports_from_to_id: true,
        encoding: XmlEncoding::Utf8,
        attributes: with_extra(
            base_attributes(),
            vec![
                attr("walkstack", Boolean, "General"),
                attr("blocking", Boolean, "General"),
            ],
        ),
    }
}

fn tfs_12() -> AttributeSchema {
    AttributeSchema {
        server: "tfs-1.2",
        display_name: "TFS 1.2",
        supports_from_to_id: true,
        encoding: XmlEncoding::Utf8,
        attributes: with_extra(
            base_attributes(),
            vec![
                attr("walkstack", Boolean, "General"),
                attr("blocking", Boolean, "General"),
                attr("destroyto", Number, "Decay"),
            ],
        ),
    }
}

fn tfs_13() -> AttributeSchema {
    AttributeSchema {
        server: "tfs-1.3",
        display_name: "TFS 1.3",
        supports_from_to_id: true,
        encoding: XmlEncoding::Utf8,
        attributes: with_extra(
            base_attributes(),
            vec![
                attr("walkstack", Boolean, "General"),
                attr("blocking", Boolean, "General"),
                attr("destroyto", Number, "Decay"),
                attr("storeitem", Boolean, "General"),
                attr("worth", Number, "General"),
            ],
        ),
    }
}

fn tfs_14() -> AttributeSchema {
    AttributeSchema {
        server: "tfs-1.4",
        display_name: "TFS 1.4",
        supports_from_to_id: true,
        encoding: XmlEncoding::Utf8,
        attributes: with_extra(
            base_attributes(),
            vec![
                attr("walkstack", Boolean, "General"),
                attr("blocking", Boolean, "General"),
                attr("destroyto", Number, "Decay"),
                attr("storeitem", Boolean, "General"),
                attr("worth", Number, "General"),
                attr("wrapable", Boolean, "General"),
                attr("wrapableto", Number, "General"),
                attr("supply", Boolean, "General"),
            ],
        ),
    }
}

fn otservbr() -> AttributeSchema {
    AttributeSchema {
        server: "otservbr-global",
        display_name: "OTServBR Global",
        supports_from_to_id: true,
        encoding: XmlEncoding::Utf8,
        attributes: with_extra(
            base_attributes(),
            vec![
                attr("walkstack", Boolean, "General"),
                attr("blocking", Boolean, "General"),
                attr("destroyto", Number, "Decay"),
                attr("storeitem", Boolean, "General"),
                attr("worth", Number, "General"),
                attr("wrapable", Boolean, "General"),
                attr("wrapableto", Number, "General"),
                attr("imbuingslots", Number, "Equipment"),
            ],
        ),
    }
}

fn canary() -> AttributeSchema {
    AttributeSchema {
        server: "canary",
        display_name: "Canary",
        // Canary's pipeline regenerates per-id entries; never merge ranges.
        supports_from_to_id: false,
        encoding: XmlEncoding::Utf8,
        attributes: with_extra(
            base_attributes(),
            vec![
                attr("walkstack", Boolean, "General"),
                attr("blocking", Boolean, "General"),
                attr("destroyto", Number, "Decay"),
                attr("storeitem", Boolean, "General"),
                attr("worth", Number, "General"),
                attr("wrapable", Boolean, "General"),
                attr("wrapableto", Number, "General"),
                attr("imbuementslot", Number, "Equipment"),
                attr("upgradeclassification", Number, "Equipment"),
                attr("tier", Number, "Equipment"),
            ],
        ),
    }
}

/// Builds all dialect schemas, in display order.
pub(super) fn build_all() -> Vec<AttributeSchema> {
    vec![
        tfs_036(),
        tfs_10(),
        tfs_11(),
        tfs_12(),
        tfs_13(),
        tfs_14(),
        otservbr(),
        canary(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AttributePlacement;

    #[test]
    fn all_dialect_names_unique() {
        let schemas = build_all();
        let mut names: Vec<_> = schemas.iter().map(|s| s.server).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), schemas.len());
    }

    #[test]
    fn all_keys_unique_within_schema() {
        for schema in build_all() {
            let mut keys: Vec<_> = schema.attributes.iter().map(|a| a.key).collect();
            keys.sort_unstable();
            let before = keys.len();
            keys.dedup();
            assert_eq!(keys.len(), before, "duplicate key in {}", schema.server);
        }
    }

    #[test]
    fn tag_placement_limited_to_tag_attributes() {
        for schema in build_all() {
            for attr in &schema.attributes {
                if attr.placement == AttributePlacement::Tag {
                    assert!(attr.children.is_none(), "tag attribute with children");
                }
            }
        }
    }

    #[test]
    fn mixed_attributes_carry_values() {
        for schema in build_all() {
            for attr in &schema.attributes {
                if attr.value_type == AttributeValueType::Mixed {
                    assert!(attr.values.is_some(), "{} lacks values", attr.key);
                }
            }
        }
    }
}
