//! Item tables. Seed content; the ids are stable and must not be reused
//! once a norm sample references them.

use super::{
    AgeBand, Applicability, Direction, IntelligenceDimension, InterestDimension, Item, TraitTag,
};

use Applicability::{Any, Band};
use Direction::{Forward, Reverse};

const fn intelligence(
    id: &'static str,
    dim: IntelligenceDimension,
    text: &'static str,
    applicability: Applicability,
    direction: Direction,
) -> Item {
    Item {
        id,
        tag: TraitTag::Intelligence(dim),
        text,
        applicability,
        direction,
        probe: false,
    }
}

const fn interest(
    id: &'static str,
    dim: InterestDimension,
    text: &'static str,
    applicability: Applicability,
    direction: Direction,
) -> Item {
    Item {
        id,
        tag: TraitTag::Interest(dim),
        text,
        applicability,
        direction,
        probe: false,
    }
}

const fn probe(id: &'static str, dim: InterestDimension, text: &'static str) -> Item {
    Item {
        id,
        tag: TraitTag::Interest(dim),
        text,
        applicability: Any,
        direction: Forward,
        probe: true,
    }
}

pub(super) static INTELLIGENCE_ITEMS: &[Item] = &[
    // Linguistic
    intelligence("ling-01", IntelligenceDimension::Linguistic, "I really enjoy reading all kinds of books and articles", Any, Forward),
    intelligence("ling-02", IntelligenceDimension::Linguistic, "I can explain complicated things to other people clearly", Any, Forward),
    intelligence("ling-03", IntelligenceDimension::Linguistic, "I like writing a diary, stories, or poems", Any, Forward),
    intelligence("ling-04", IntelligenceDimension::Linguistic, "I have a rich vocabulary and find the right words for my ideas", Band(AgeBand::Middle), Forward),
    intelligence("ling-05", IntelligenceDimension::Linguistic, "I like word games, riddles, and learning new words", Band(AgeBand::Young), Forward),
    intelligence("ling-06", IntelligenceDimension::Linguistic, "I find it hard to put my thoughts into words", Any, Reverse),
    intelligence("ling-07", IntelligenceDimension::Linguistic, "Reading long texts bores me quickly", Any, Reverse),
    // Logical-mathematical
    intelligence("logi-01", IntelligenceDimension::Logical, "I enjoy solving puzzles and brain teasers", Any, Forward),
    intelligence("logi-02", IntelligenceDimension::Logical, "I like figuring out how and why things work", Any, Forward),
    intelligence("logi-03", IntelligenceDimension::Logical, "Mental arithmetic comes easily to me", Any, Forward),
    intelligence("logi-04", IntelligenceDimension::Logical, "I look for patterns and rules in what I see", Band(AgeBand::Teen), Forward),
    intelligence("logi-05", IntelligenceDimension::Logical, "Math problems make me want to give up right away", Any, Reverse),
    intelligence("logi-06", IntelligenceDimension::Logical, "Step-by-step reasoning confuses me", Any, Reverse),
    // Spatial
    intelligence("spat-01", IntelligenceDimension::Spatial, "I like drawing, painting, or doodling", Any, Forward),
    intelligence("spat-02", IntelligenceDimension::Spatial, "I can easily picture objects rotated in my head", Any, Forward),
    intelligence("spat-03", IntelligenceDimension::Spatial, "I rarely get lost, even in new places", Any, Forward),
    intelligence("spat-04", IntelligenceDimension::Spatial, "I enjoy jigsaw puzzles and building blocks", Band(AgeBand::Young), Forward),
    intelligence("spat-05", IntelligenceDimension::Spatial, "Reading maps or diagrams is difficult for me", Any, Reverse),
    intelligence("spat-06", IntelligenceDimension::Spatial, "I struggle to imagine how a finished model will look", Any, Reverse),
    // Musical
    intelligence("musi-01", IntelligenceDimension::Musical, "I remember melodies after hearing them once or twice", Any, Forward),
    intelligence("musi-02", IntelligenceDimension::Musical, "I like singing, humming, or playing an instrument", Any, Forward),
    intelligence("musi-03", IntelligenceDimension::Musical, "I notice when music is off-beat or out of tune", Any, Forward),
    intelligence("musi-04", IntelligenceDimension::Musical, "I make up my own tunes or rhythms", Band(AgeBand::Young), Forward),
    intelligence("musi-05", IntelligenceDimension::Musical, "Music mostly sounds the same to me", Any, Reverse),
    intelligence("musi-06", IntelligenceDimension::Musical, "Keeping a beat while clapping or dancing is hard for me", Any, Reverse),
    // Bodily-kinesthetic
    intelligence("bodi-01", IntelligenceDimension::Bodily, "I am good at sports and physical games", Any, Forward),
    intelligence("bodi-02", IntelligenceDimension::Bodily, "I like making things with my hands", Any, Forward),
    intelligence("bodi-03", IntelligenceDimension::Bodily, "I learn new movements and dances quickly", Any, Forward),
    intelligence("bodi-04", IntelligenceDimension::Bodily, "I would rather move around than sit still", Band(AgeBand::Young), Forward),
    intelligence("bodi-05", IntelligenceDimension::Bodily, "I am clumsy with balls and balance games", Any, Reverse),
    intelligence("bodi-06", IntelligenceDimension::Bodily, "Crafts that need careful hand work frustrate me", Any, Reverse),
    // Interpersonal
    intelligence("intp-01", IntelligenceDimension::Interpersonal, "Friends come to me when they have a problem", Any, Forward),
    intelligence("intp-02", IntelligenceDimension::Interpersonal, "I can usually tell how other people are feeling", Any, Forward),
    intelligence("intp-03", IntelligenceDimension::Interpersonal, "I enjoy working in a group", Any, Forward),
    intelligence("intp-04", IntelligenceDimension::Interpersonal, "I help classmates get along when they argue", Band(AgeBand::Middle), Forward),
    intelligence("intp-05", IntelligenceDimension::Interpersonal, "I find it hard to understand why people get upset", Any, Reverse),
    intelligence("intp-06", IntelligenceDimension::Interpersonal, "I prefer to avoid meeting new people", Any, Reverse),
    // Intrapersonal
    intelligence("intr-01", IntelligenceDimension::Intrapersonal, "I know what I am good at and what I find hard", Any, Forward),
    intelligence("intr-02", IntelligenceDimension::Intrapersonal, "I think about my day and what I could do better", Any, Forward),
    intelligence("intr-03", IntelligenceDimension::Intrapersonal, "I set goals for myself and work toward them", Band(AgeBand::Teen), Forward),
    intelligence("intr-04", IntelligenceDimension::Intrapersonal, "I can calm myself down when I am upset", Any, Forward),
    intelligence("intr-05", IntelligenceDimension::Intrapersonal, "I am often surprised by my own reactions", Any, Reverse),
    intelligence("intr-06", IntelligenceDimension::Intrapersonal, "I rarely think about why I feel the way I do", Any, Reverse),
    // Naturalistic
    intelligence("natu-01", IntelligenceDimension::Naturalistic, "I like watching animals, plants, or the weather", Any, Forward),
    intelligence("natu-02", IntelligenceDimension::Naturalistic, "I notice small differences between similar things in nature", Any, Forward),
    intelligence("natu-03", IntelligenceDimension::Naturalistic, "I enjoy collecting and sorting stones, leaves, or shells", Band(AgeBand::Young), Forward),
    intelligence("natu-04", IntelligenceDimension::Naturalistic, "I like learning how ecosystems fit together", Band(AgeBand::Teen), Forward),
    intelligence("natu-05", IntelligenceDimension::Naturalistic, "Being outdoors does not interest me much", Any, Reverse),
    intelligence("natu-06", IntelligenceDimension::Naturalistic, "I cannot tell common plants or birds apart", Any, Reverse),
];

pub(super) static INTEREST_ITEMS: &[Item] = &[
    // Realistic
    interest("real-01", InterestDimension::Realistic, "I like working with tools, machines, or building kits", Any, Forward),
    interest("real-02", InterestDimension::Realistic, "I enjoy fixing things that are broken", Any, Forward),
    interest("real-03", InterestDimension::Realistic, "I like being active outdoors", Any, Forward),
    interest("real-04", InterestDimension::Realistic, "I dislike work that gets my hands dirty", Any, Reverse),
    interest("real-05", InterestDimension::Realistic, "Using tools feels difficult and awkward to me", Any, Reverse),
    // Investigative
    interest("inve-01", InterestDimension::Investigative, "I like doing experiments to see what happens", Any, Forward),
    interest("inve-02", InterestDimension::Investigative, "I ask a lot of questions about how the world works", Any, Forward),
    interest("inve-03", InterestDimension::Investigative, "I enjoy solving hard problems that take a long time", Any, Forward),
    interest("inve-04", InterestDimension::Investigative, "Science topics bore me", Any, Reverse),
    interest("inve-05", InterestDimension::Investigative, "When a problem is hard I would rather give up than dig in", Any, Reverse),
    // Artistic
    interest("arti-01", InterestDimension::Artistic, "I like drawing, music, dance, or acting", Any, Forward),
    interest("arti-02", InterestDimension::Artistic, "I enjoy making up stories or inventing things", Any, Forward),
    interest("arti-03", InterestDimension::Artistic, "I like decorating and arranging things to look nice", Any, Forward),
    interest("arti-04", InterestDimension::Artistic, "I think art activities are a waste of time", Any, Reverse),
    interest("arti-05", InterestDimension::Artistic, "I dislike performing or showing my work to others", Any, Reverse),
    // Social
    interest("soci-01", InterestDimension::Social, "I like helping classmates who are stuck", Any, Forward),
    interest("soci-02", InterestDimension::Social, "I enjoy taking care of younger children or pets", Any, Forward),
    interest("soci-03", InterestDimension::Social, "I like explaining things to others so they understand", Any, Forward),
    interest("soci-04", InterestDimension::Social, "I would rather work alone than with other people", Any, Reverse),
    interest("soci-05", InterestDimension::Social, "Other people's problems are not my concern", Any, Reverse),
    // Enterprising
    interest("ente-01", InterestDimension::Enterprising, "I like organizing games or activities for others", Any, Forward),
    interest("ente-02", InterestDimension::Enterprising, "I enjoy convincing people of my ideas", Any, Forward),
    interest("ente-03", InterestDimension::Enterprising, "I like being the leader of a team", Any, Forward),
    interest("ente-04", InterestDimension::Enterprising, "Speaking in front of a group scares me off", Any, Reverse),
    interest("ente-05", InterestDimension::Enterprising, "I avoid competitions whenever I can", Any, Reverse),
    // Conventional
    interest("conv-01", InterestDimension::Conventional, "I like keeping my things sorted and tidy", Any, Forward),
    interest("conv-02", InterestDimension::Conventional, "I enjoy making lists and plans", Any, Forward),
    interest("conv-03", InterestDimension::Conventional, "I like tasks with clear rules and steps", Any, Forward),
    interest("conv-04", InterestDimension::Conventional, "Careful, detailed work annoys me", Any, Reverse),
    interest("conv-05", InterestDimension::Conventional, "I would rather improvise than follow a plan", Any, Reverse),
    // Social-desirability probes
    probe("sds-01", InterestDimension::Social, "I have never told a lie"),
    probe("sds-02", InterestDimension::Social, "I always help anyone who asks, no matter how busy I am"),
    probe("sds-03", InterestDimension::Conventional, "I am never late and never forget anything"),
    probe("sds-04", InterestDimension::Enterprising, "I have never been afraid of any challenge"),
];

pub(super) static INTELLIGENCE_CONSISTENCY_PAIRS: &[(&str, &str)] = &[
    ("ling-01", "ling-03"),
    ("logi-01", "logi-02"),
    ("spat-01", "spat-02"),
    ("intp-01", "intp-03"),
];

pub(super) static INTEREST_CONSISTENCY_PAIRS: &[(&str, &str)] = &[
    ("real-01", "real-02"),
    ("inve-01", "inve-02"),
    ("soci-01", "soci-03"),
];
