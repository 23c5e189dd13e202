//! Built-in course and community taxonomies

use crate::filter::{Filter, FilterKey};
use crate::tree::{HeaderItem, NavNode, NavTree};

/// Base path of the course listing.
pub const LECTURES_PATH: &str = "/lectures";

/// Base path of the community board.
pub const COMMUNITY_PATH: &str = "/community";

/// Path of the academy directory.
pub const ACADEMIES_PATH: &str = "/academies";

/// Topic entries shown under every format: (label, search term).
pub const COURSE_TOPICS: [(&str, &str); 5] = [
    ("데이터엔지니어링", "데이터 엔지니어링"),
    ("클라우드", "클라우드"),
    ("보안", "보안"),
    ("AI", "AI"),
    ("웹개발", "웹 개발"),
];

/// Community board categories. The label is also the query value.
pub const COMMUNITY_CATEGORIES: [&str; 5] = ["자유", "질문", "후기", "스터디", "취업"];

/// Course audience (`target`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Audience {
    /// Working professionals
    Employee,
    /// University students
    Student,
}

impl Audience {
    /// All audiences in menu order.
    pub const ALL: [Audience; 2] = [Audience::Employee, Audience::Student];

    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Audience::Employee => "employee",
            Audience::Student => "student",
        }
    }

    /// Parse a wire value; unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == value)
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            Audience::Employee => "재직자과정",
            Audience::Student => "대학생과정",
        }
    }
}

/// Course delivery format (`format`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryFormat {
    /// Fully online
    Online,
    /// In a classroom
    Offline,
    /// Mixed online and classroom
    Hybrid,
}

impl DeliveryFormat {
    /// All formats in menu order.
    pub const ALL: [DeliveryFormat; 3] = [
        DeliveryFormat::Online,
        DeliveryFormat::Offline,
        DeliveryFormat::Hybrid,
    ];

    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryFormat::Online => "online",
            DeliveryFormat::Offline => "offline",
            DeliveryFormat::Hybrid => "hybrid",
        }
    }

    /// Parse a wire value; unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value)
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            DeliveryFormat::Online => "온라인",
            DeliveryFormat::Offline => "오프라인",
            DeliveryFormat::Hybrid => "혼합",
        }
    }
}

/// Check whether `label` is one of the community categories.
pub fn is_community_category(label: &str) -> bool {
    COMMUNITY_CATEGORIES.contains(&label)
}

/// The course taxonomy: audience → format → topic.
pub fn course_tree() -> NavTree {
    let roots = Audience::ALL
        .into_iter()
        .map(|audience| {
            let formats = DeliveryFormat::ALL
                .into_iter()
                .map(|format| {
                    let topics = COURSE_TOPICS
                        .iter()
                        .map(|(label, term)| {
                            NavNode::leaf(*label, Filter::new().with(FilterKey::Q, *term))
                        })
                        .collect();
                    NavNode::branch(
                        format.label(),
                        Filter::new().with(FilterKey::Format, format.as_str()),
                        topics,
                    )
                })
                .collect();
            NavNode::branch(
                audience.label(),
                Filter::new().with(FilterKey::Target, audience.as_str()),
                formats,
            )
        })
        .collect();
    NavTree::new(LECTURES_PATH, roots)
}

/// The community taxonomy: a filterless section entry with one child per
/// category.
pub fn community_tree() -> NavTree {
    let categories = COMMUNITY_CATEGORIES
        .iter()
        .map(|c| NavNode::leaf(*c, Filter::new().with(FilterKey::Category, *c)))
        .collect();
    NavTree::new(
        COMMUNITY_PATH,
        vec![NavNode::branch("커뮤니티", Filter::new(), categories)],
    )
}

/// The site header: course menus, the academy directory, and the community
/// menu.
pub fn default_header() -> Vec<HeaderItem> {
    vec![
        HeaderItem::Menu(course_tree()),
        HeaderItem::link("학원 찾기", ACADEMIES_PATH),
        HeaderItem::Menu(community_tree()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_tree_shape() {
        let tree = course_tree();
        assert_eq!(tree.roots.len(), 2);
        assert_eq!(tree.roots[0].children().len(), 3);
        assert_eq!(tree.roots[0].height(), 3);
        assert_eq!(tree.len(), 2 + 2 * 3 + 2 * 3 * COURSE_TOPICS.len());
    }

    #[test]
    fn test_wire_values_parse() {
        assert_eq!(Audience::parse("student"), Some(Audience::Student));
        assert_eq!(Audience::parse("Student"), None);
        assert_eq!(DeliveryFormat::parse("hybrid"), Some(DeliveryFormat::Hybrid));
        assert_eq!(DeliveryFormat::parse("remote"), None);
    }

    #[test]
    fn test_community_root_has_no_filter() {
        let tree = community_tree();
        assert!(tree.roots[0].filter().is_empty());
        assert!(is_community_category("후기"));
        assert!(!is_community_category("공지"));
    }
}
