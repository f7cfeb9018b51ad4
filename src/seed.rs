use anyhow::Result;

use crate::{
    driver::Outcome,
    logger,
    session::Session,
    verify,
};

/// Outcome of a seed run, for display and for end-to-end assertions.
#[derive(Debug)]
pub struct SeedSummary {
    pub tables: Vec<(&'static str, Outcome)>,
    pub articles_inserted: usize,
    pub categories_inserted: usize,
    pub comments_inserted: usize,
    pub reporters_inserted: usize,
    pub article_count: Option<u64>,
}

struct Article {
    id: &'static str,
    title: &'static str,
    category: &'static str,
    date: &'static str,
    status: &'static str,
    views: u32,
    body: &'static str,
}

struct Category {
    id: &'static str,
    name: &'static str,
    slug: &'static str,
    parent_id: &'static str,
    sort_order: u32,
    visible: u8,
}

struct Comment {
    id: &'static str,
    article_id: &'static str,
    article_title: &'static str,
    author: &'static str,
    content: &'static str,
    date: &'static str,
    status: &'static str,
    ip: &'static str,
}

struct Reporter {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    department: &'static str,
    title: &'static str,
    bio: &'static str,
    active: u8,
    article_count: u32,
    join_date: &'static str,
}

/// Backslash-escape apostrophes, one pass. This is deliberately minimal: the
/// values interpolated into statements are the fixed literal set below, never
/// external input, so no general quoting policy is needed here.
pub fn escape(s: &str) -> String {
    s.replace('\'', "\\'")
}

const TABLES: &[(&str, &str)] = &[
    (
        "articles",
        "CREATE TABLE IF NOT EXISTS articles (
        id VARCHAR(50) PRIMARY KEY,
        title VARCHAR(500) NOT NULL,
        category VARCHAR(50) NOT NULL,
        date VARCHAR(20) NOT NULL,
        status VARCHAR(20) DEFAULT '게시',
        views INT DEFAULT 0,
        body TEXT,
        thumbnail TEXT,
        tags VARCHAR(500) DEFAULT '',
        author VARCHAR(100) DEFAULT '',
        summary TEXT
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4",
    ),
    (
        "comments",
        "CREATE TABLE IF NOT EXISTS comments (
        id VARCHAR(50) PRIMARY KEY,
        articleId VARCHAR(50),
        articleTitle VARCHAR(500),
        author VARCHAR(100),
        content TEXT,
        date VARCHAR(20),
        status VARCHAR(20) DEFAULT 'pending',
        ip VARCHAR(50)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4",
    ),
    (
        "categories",
        "CREATE TABLE IF NOT EXISTS categories (
        id VARCHAR(50) PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        slug VARCHAR(100),
        parentId VARCHAR(50) DEFAULT '',
        sortOrder INT DEFAULT 0,
        visible TINYINT DEFAULT 1
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4",
    ),
    (
        "reporters",
        "CREATE TABLE IF NOT EXISTS reporters (
        id VARCHAR(50) PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        email VARCHAR(200),
        phone VARCHAR(50),
        department VARCHAR(50),
        title VARCHAR(50),
        bio TEXT,
        active TINYINT DEFAULT 1,
        articleCount INT DEFAULT 0,
        joinDate VARCHAR(20)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4",
    ),
];

macro_rules! article {
    ($id:expr, $title:expr, $cat:expr, $date:expr, $status:expr, $views:expr, $body:expr) => {
        Article {
            id: $id,
            title: $title,
            category: $cat,
            date: $date,
            status: $status,
            views: $views,
            body: $body,
        }
    };
}

const ARTICLES: &[Article] = &[
    // Admin sample articles
    article!("sample-1", "2024 한국 문화예술 트렌드 분석", "문화", "2024-12-01", "게시", 1520, "올해 한국 문화예술계는 다양한 변화를 겪었습니다..."),
    article!("sample-2", "신인 배우 김하늘 인터뷰", "연예", "2024-12-05", "게시", 3200, "올해 가장 주목받는 신인 배우 김하늘을 만나보았습니다..."),
    article!("sample-3", "K리그 2025 시즌 전망", "스포츠", "2024-12-10", "임시저장", 870, "2025 시즌 K리그의 전력 변화를 분석합니다..."),
    article!("sample-4", "겨울 여행지 추천 BEST 10", "라이프", "2024-12-12", "게시", 4100, "올 겨울 가볼 만한 국내 여행지를 소개합니다..."),
    article!("sample-5", "국립중앙박물관 특별전 포토", "포토", "2024-12-14", "게시", 2300, "국립중앙박물관에서 열린 특별전의 현장 사진입니다..."),
    // News grid articles
    article!("grid-1", "정부, 2026년 하반기 경제 정책 방향 발표", "뉴스", "2026-02-14", "게시", 0, ""),
    article!("grid-2", "서울시, 대규모 도시 재생 프로젝트 착수", "뉴스", "2026-02-14", "게시", 0, ""),
    article!("grid-3", "IT 업계, AI 인재 확보 전쟁 심화", "뉴스", "2026-02-14", "게시", 0, ""),
    article!("grid-4", "주요 대학 입시 제도 개편안 확정", "뉴스", "2026-02-14", "게시", 0, ""),
    article!("grid-5", "한국은행, 기준금리 동결 결정 배경", "경제", "2026-02-14", "게시", 0, ""),
    article!("grid-6", "글로벌 반도체 수급 안정세 전망", "경제", "2026-02-14", "게시", 0, ""),
    // Best articles
    article!("best-1", "2026년 부동산 시장 전망과 투자 전략", "경제", "2026-02-14", "게시", 0, ""),
    article!("best-2", "건강보험 개편안, 달라지는 혜택 총정리", "뉴스", "2026-02-14", "게시", 0, ""),
    article!("best-3", "AI가 바꾸는 일상: 생활 속 인공지능 활용법", "뉴스", "2026-02-14", "게시", 0, ""),
    article!("best-4", "올해 주목할 해외여행 트렌드 5가지", "라이프", "2026-02-14", "게시", 0, ""),
    article!("best-5", "퇴직 후 재취업, 성공하는 사람들의 비결", "라이프", "2026-02-14", "게시", 0, ""),
    // Sports / Regional
    article!("sports-1", "프로야구 2026 시즌 개막전 일정 확정", "스포츠", "2026-02-14", "게시", 0, ""),
    article!("sports-2", "손흥민, 리그 10호 골 폭발적 활약", "스포츠", "2026-02-14", "게시", 0, ""),
    article!("sports-3", "여자 배구 올스타전 팬 투표 시작", "스포츠", "2026-02-14", "게시", 0, ""),
    article!("region-1", "부산 해운대 관광특구 야간 축제 개최", "뉴스", "2026-02-14", "게시", 0, ""),
    article!("region-2", "제주도 감귤 수확량 역대 최고 기록", "뉴스", "2026-02-14", "게시", 0, ""),
    article!("region-3", "대구 도심 재개발 사업 주민 설명회", "뉴스", "2026-02-14", "게시", 0, ""),
    // Category news - 뉴스
    article!("cn-1", "국회, 2026년 추경 예산안 심사 착수", "뉴스", "2026-02-14", "게시", 0, ""),
    article!("cn-2", "수도권 신도시 교통 대책 마련 촉구", "뉴스", "2026-02-14", "게시", 0, ""),
    article!("cn-3", "중소기업 디지털 전환 지원 정책 확대", "뉴스", "2026-02-13", "게시", 0, ""),
    article!("cn-4", "환경부, 탄소중립 실행 계획 2단계 발표", "뉴스", "2026-02-13", "게시", 0, ""),
    article!("cn-5", "지방자치단체 재정 건전성 평가 결과 공개", "뉴스", "2026-02-12", "게시", 0, ""),
    article!("cn-6", "외교부, 한미 정상회담 일정 조율 중", "뉴스", "2026-02-12", "게시", 0, ""),
    // Category news - 연예
    article!("ce-1", "신예 배우 김하늘, 칸 영화제 초청작 주연 발탁", "연예", "2026-02-14", "게시", 0, ""),
    article!("ce-2", "아이돌 그룹 '스타라이즈' 월드투어 전석 매진", "연예", "2026-02-14", "게시", 0, ""),
    article!("ce-3", "넷플릭스 한국 오리지널 시리즈 글로벌 1위", "연예", "2026-02-13", "게시", 0, ""),
    article!("ce-4", "예능 프로그램 '함께 살아요' 시청률 20% 돌파", "연예", "2026-02-13", "게시", 0, ""),
    article!("ce-5", "베테랑 가수 이정현, 30주년 기념 콘서트 개최", "연예", "2026-02-12", "게시", 0, ""),
    article!("ce-6", "한국 웹툰 원작 할리우드 영화 제작 확정", "연예", "2026-02-12", "게시", 0, ""),
];

const CATEGORIES: &[Category] = &[
    Category { id: "cat-1", name: "뉴스", slug: "news", parent_id: "", sort_order: 1, visible: 1 },
    Category { id: "cat-2", name: "연예", slug: "entertainment", parent_id: "", sort_order: 2, visible: 1 },
    Category { id: "cat-3", name: "스포츠", slug: "sports", parent_id: "", sort_order: 3, visible: 1 },
    Category { id: "cat-4", name: "문화", slug: "culture", parent_id: "", sort_order: 4, visible: 1 },
    Category { id: "cat-5", name: "라이프", slug: "life", parent_id: "", sort_order: 5, visible: 1 },
    Category { id: "cat-6", name: "포토", slug: "photo", parent_id: "", sort_order: 6, visible: 1 },
    Category { id: "cat-7", name: "경제", slug: "economy", parent_id: "", sort_order: 7, visible: 1 },
];

const COMMENTS: &[Comment] = &[
    Comment {
        id: "cmt-1",
        article_id: "sample-1",
        article_title: "2024 한국 문화예술 트렌드 분석",
        author: "문화사랑",
        content: "좋은 기사 감사합니다. 올해 문화계 동향을 한눈에 볼 수 있어서 유익합니다.",
        date: "2024-12-02",
        status: "approved",
        ip: "192.168.1.10",
    },
    Comment {
        id: "cmt-2",
        article_id: "sample-2",
        article_title: "신인 배우 김하늘 인터뷰",
        author: "드라마팬",
        content: "앞으로 활약이 기대됩니다!",
        date: "2024-12-06",
        status: "approved",
        ip: "192.168.1.20",
    },
    Comment {
        id: "cmt-3",
        article_id: "sample-1",
        article_title: "2024 한국 문화예술 트렌드 분석",
        author: "스팸봇",
        content: "최고의 수익 기회! 지금 바로 클릭하세요...",
        date: "2024-12-03",
        status: "spam",
        ip: "10.0.0.99",
    },
    Comment {
        id: "cmt-4",
        article_id: "sample-4",
        article_title: "겨울 여행지 추천 BEST 10",
        author: "여행러",
        content: "5번 여행지 정보가 좀 다른 것 같은데 확인 부탁드립니다.",
        date: "2024-12-13",
        status: "pending",
        ip: "192.168.1.30",
    },
];

const REPORTERS: &[Reporter] = &[
    Reporter {
        id: "rpt-1",
        name: "김문화",
        email: "kim@culturepeople.co.kr",
        phone: "010-1234-5678",
        department: "문화부",
        title: "부장",
        bio: "문화예술 분야 10년 경력 기자",
        active: 1,
        article_count: 120,
        join_date: "2024-01-01",
    },
    Reporter {
        id: "rpt-2",
        name: "이연예",
        email: "lee@culturepeople.co.kr",
        phone: "010-2345-6789",
        department: "연예부",
        title: "기자",
        bio: "K-POP, 드라마, 영화 담당",
        active: 1,
        article_count: 85,
        join_date: "2024-03-15",
    },
    Reporter {
        id: "rpt-3",
        name: "박스포츠",
        email: "park@culturepeople.co.kr",
        phone: "010-3456-7890",
        department: "스포츠부",
        title: "기자",
        bio: "축구, 야구 등 스포츠 전문",
        active: 1,
        article_count: 67,
        join_date: "2024-05-01",
    },
];

fn article_insert(a: &Article) -> String {
    format!(
        "INSERT IGNORE INTO articles (id, title, category, date, status, views, body, thumbnail, tags, author, summary) \
         VALUES ('{}', '{}', '{}', '{}', '{}', {}, '{}', '', '', '', '')",
        a.id,
        escape(a.title),
        a.category,
        a.date,
        a.status,
        a.views,
        escape(a.body),
    )
}

fn category_insert(c: &Category) -> String {
    format!(
        "INSERT IGNORE INTO categories (id, name, slug, parentId, sortOrder, visible) \
         VALUES ('{}', '{}', '{}', '{}', {}, {})",
        c.id, c.name, c.slug, c.parent_id, c.sort_order, c.visible,
    )
}

fn comment_insert(c: &Comment) -> String {
    format!(
        "INSERT IGNORE INTO comments (id, articleId, articleTitle, author, content, date, status, ip) \
         VALUES ('{}', '{}', '{}', '{}', '{}', '{}', '{}', '{}')",
        c.id,
        c.article_id,
        escape(c.article_title),
        c.author,
        escape(c.content),
        c.date,
        c.status,
        c.ip,
    )
}

fn reporter_insert(r: &Reporter) -> String {
    format!(
        "INSERT IGNORE INTO reporters (id, name, email, phone, department, title, bio, active, articleCount, joinDate) \
         VALUES ('{}', '{}', '{}', '{}', '{}', '{}', '{}', {}, {}, '{}')",
        r.id,
        r.name,
        r.email,
        r.phone,
        r.department,
        r.title,
        r.bio,
        r.active,
        r.article_count,
        r.join_date,
    )
}

pub fn attempted_articles() -> usize {
    ARTICLES.len()
}

/// Create the four tables, insert the fixed sample rows, and run the
/// verification queries. Per-statement failures print and are counted;
/// only transport-level errors abort the run.
pub fn run(session: &Session, db: &str) -> Result<SeedSummary> {
    println!("\n=== Creating tables ===");
    let mut tables = Vec::new();
    for (name, ddl) in TABLES {
        let outcome = session.execute(ddl, db)?;
        println!(
            "  {}: {} - {}",
            name,
            if outcome.accepted() { "OK" } else { "FAIL" },
            outcome.label()
        );
        tables.push((*name, outcome));
    }

    println!("\n=== Inserting articles ===");
    let mut articles_inserted = 0;
    for a in ARTICLES {
        let outcome = session.execute(&article_insert(a), db)?;
        if outcome.accepted() {
            articles_inserted += 1;
        } else {
            println!("  FAIL: {} - {}", a.title, outcome.label());
            logger::error(&format!("article insert failed: {} - {}", a.id, outcome.label()));
        }
    }
    println!("  Inserted: {}/{}", articles_inserted, ARTICLES.len());

    println!("\n=== Inserting categories ===");
    let mut categories_inserted = 0;
    for c in CATEGORIES {
        if session.execute(&category_insert(c), db)?.accepted() {
            categories_inserted += 1;
        }
    }
    println!("  Inserted: {}/{}", categories_inserted, CATEGORIES.len());

    println!("\n=== Inserting comments ===");
    let mut comments_inserted = 0;
    for c in COMMENTS {
        if session.execute(&comment_insert(c), db)?.accepted() {
            comments_inserted += 1;
        }
    }
    println!("  Inserted: {}/{}", comments_inserted, COMMENTS.len());

    println!("\n=== Inserting reporters ===");
    let mut reporters_inserted = 0;
    for r in REPORTERS {
        if session.execute(&reporter_insert(r), db)?.accepted() {
            reporters_inserted += 1;
        }
    }
    println!("  Inserted: {}/{}", reporters_inserted, REPORTERS.len());

    println!("\n=== Verification ===");
    let mut article_count = None;
    for (label, table) in [
        ("Articles", "articles"),
        ("Categories", "categories"),
        ("Comments", "comments"),
        ("Reporters", "reporters"),
    ] {
        let count = verify::table_count(session, db, table)?;
        if table == "articles" {
            article_count = count;
        }
        match count {
            Some(n) => println!("  {label} in DB: {n}"),
            None => println!("  {label} in DB: could not read count"),
        }
    }

    println!("\n=== SHOW TABLES ===");
    let names = verify::list_tables(session, db, None)?;
    println!("  Tables: {names:?}");

    println!("\nDone!");
    Ok(SeedSummary {
        tables,
        articles_inserted,
        categories_inserted,
        comments_inserted,
        reporters_inserted,
        article_count,
    })
}
