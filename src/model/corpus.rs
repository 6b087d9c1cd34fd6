//! Bundled labeled corpus used for the first-ever training run.
//!
//! Labels: 1 = positive, 0 = neutral, -1 = negative. The corpus is fixed, so
//! training from it is fully deterministic - two fresh data directories end
//! up with byte-identical model artifacts.

/// (text, label) training pairs, eight per class.
pub const TRAINING_EXAMPLES: &[(&str, i8)] = &[
    // Positive
    ("The professor was very helpful and engaging.", 1),
    ("I really enjoyed the class today.", 1),
    ("The course materials were excellent and well-organized.", 1),
    ("The instructor explained the concepts clearly.", 1),
    ("The feedback from the teacher was constructive and useful.", 1),
    ("I appreciate how responsive the department is to student concerns.", 1),
    ("The new facilities are a great improvement.", 1),
    ("The online resources provided were very helpful for studying.", 1),
    // Negative
    ("The lecture was boring and hard to follow.", -1),
    ("The assignment instructions were unclear.", -1),
    ("The classroom was too crowded and noisy.", -1),
    ("The professor didn't answer my questions properly.", -1),
    ("The course materials were outdated.", -1),
    ("The grading system is unfair.", -1),
    ("The department is disorganized.", -1),
    ("The feedback was not helpful at all.", -1),
    // Neutral
    ("The class starts at 9 AM.", 0),
    ("The textbook has 12 chapters.", 0),
    ("The exam will cover all material from the semester.", 0),
    ("The assignment is due next Friday.", 0),
    ("The department office is located in building B.", 0),
    ("The course has three sections.", 0),
    ("The lecture slides are available online.", 0),
    ("The professor's office hours are on Tuesdays.", 0),
];

/// English stop words filtered out during vectorization (Glasgow IR list).
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against",
    "all", "almost", "alone", "along", "already", "also", "although", "always",
    "am", "among", "amongst", "amoungst", "amount", "an", "and", "another",
    "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being",
    "below", "beside", "besides", "between", "beyond", "bill", "both",
    "bottom", "but", "by", "call", "can", "cannot", "cant", "co", "con",
    "could", "couldnt", "cry", "de", "describe", "detail", "do", "done",
    "down", "due", "during", "each", "eg", "eight", "either", "eleven",
    "else", "elsewhere", "empty", "enough", "etc", "even", "ever", "every",
    "everyone", "everything", "everywhere", "except", "few", "fifteen",
    "fifty", "fill", "find", "fire", "first", "five", "for", "former",
    "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her",
    "here", "hereafter", "hereby", "herein", "hereupon", "hers", "herself",
    "him", "himself", "his", "how", "however", "hundred", "i", "ie", "if",
    "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself",
    "keep", "last", "latter", "latterly", "least", "less", "ltd", "made",
    "many", "may", "me", "meanwhile", "might", "mill", "mine", "more",
    "moreover", "most", "mostly", "move", "much", "must", "my", "myself",
    "name", "namely", "neither", "never", "nevertheless", "next", "nine",
    "no", "nobody", "none", "noone", "nor", "not", "nothing", "now",
    "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out",
    "over", "own", "part", "per", "perhaps", "please", "put", "rather", "re",
    "same", "see", "seem", "seemed", "seeming", "seems", "serious", "several",
    "she", "should", "show", "side", "since", "sincere", "six", "sixty", "so",
    "some", "somehow", "someone", "something", "sometime", "sometimes",
    "somewhere", "still", "such", "system", "take", "ten", "than", "that",
    "the", "their", "them", "themselves", "then", "thence", "there",
    "thereafter", "thereby", "therefore", "therein", "thereupon", "these",
    "they", "thick", "thin", "third", "this", "those", "though", "three",
    "through", "throughout", "thru", "thus", "to", "together", "too", "top",
    "toward", "towards", "twelve", "twenty", "two", "un", "under", "until",
    "up", "upon", "us", "very", "via", "was", "we", "well", "were", "what",
    "whatever", "when", "whence", "whenever", "where", "whereafter",
    "whereas", "whereby", "wherein", "whereupon", "wherever", "whether",
    "which", "while", "whither", "who", "whoever", "whole", "whom", "whose",
    "why", "will", "with", "within", "without", "would", "yet", "you",
    "your", "yours", "yourself", "yourselves",
];
