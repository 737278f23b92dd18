//! Stop words excluded from keyword sets

use ahash::AHashSet;

/// Russian function words
const RUSSIAN: &[&str] = &[
    "и", "в", "во", "не", "что", "он", "на", "я", "с", "со", "как", "а", "то", "все", "она",
    "так", "его", "но", "да", "ты", "к", "у", "же", "вы", "за", "бы", "по", "только", "ее",
    "мне", "было", "вот", "от", "меня", "еще", "нет", "о", "из", "ему", "теперь", "когда",
    "даже", "ну", "вдруг", "ли", "если", "уже", "или", "ни", "быть", "был", "него", "до",
    "вас", "нибудь", "опять", "уж", "вам", "ведь", "там", "потом", "себя", "ничего", "ей",
    "может", "они", "тут", "где", "есть", "надо", "ней", "для", "мы", "тебя", "их", "чем",
    "была", "сам", "чтоб", "без", "будто", "чего", "раз", "тоже", "себе", "под", "будет", "ж",
    "тогда", "кто", "этот", "того", "потому", "этого", "какой", "совсем", "ним", "здесь",
    "этом", "один", "почти", "мой", "тем", "чтобы", "нее", "сейчас", "были", "куда", "зачем",
    "всех", "никогда", "можно", "при", "наконец", "два", "об", "другой", "хоть", "после",
    "над", "больше", "тот", "через", "эти", "нас", "про", "всего", "них", "какая", "много",
    "разве", "три", "эту", "моя", "впрочем", "хорошо", "свою", "этой", "перед", "иногда",
    "лучше", "чуть", "том", "нельзя", "такой", "им", "более", "всегда", "конечно", "всю",
    "между",
];

/// Catalog noise: attribute labels, packaging, units
const CATALOG: &[&str] = &[
    "арт", "артик", "артикул", "раз", "разм", "размер", "цвет", "гост", "станд", "стандарт",
    "группа", "тип", "типоразмер", "класс", "род", "вид", "кат", "категория", "сер", "серия",
    "ном", "номер", "марка", "сбор", "сборка", "набор", "комплект", "упак", "упаковка", "пара",
    "кор", "бокс", "бухта", "мама", "папа", "мини", "плюс", "минус", "люкс", "диам", "диаметр",
    "длина", "толщ", "толщина", "объем", "объём", "обьем", "обьём", "емкость", "ёмкость", "мкм",
    "мкф", "мгц", "гбит", "бар", "атм", "мин", "сек", "тыс", "дог",
];

/// Set of words never used as keywords
#[derive(Debug, Clone)]
pub struct StopWords {
    words: AHashSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self::from_words(RUSSIAN.iter().chain(CATALOG))
    }
}

impl StopWords {
    /// An empty set
    pub fn empty() -> Self {
        Self {
            words: AHashSet::new(),
        }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        set.extend(words);
        set
    }

    /// Add words (lower-cased)
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().trim().to_lowercase()).filter(|w| !w.is_empty()));
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
