//! The shipped lesson and exercise catalog.
//!
//! Built once at startup and shared read-only; completion is overlaid with
//! [`crate::model::hydrate`] instead of being written into these items.

use std::collections::HashSet;

use thiserror::Error;

use crate::model::{
    CatalogItem, Category, ContentBlock, Difficulty, Exercise, ExerciseId, Hydrated, Lesson,
    LessonId, LessonLevel,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("duplicate {category} id: {id}")]
    DuplicateId { category: Category, id: String },

    #[error("blank {category} id")]
    BlankId { category: Category },
}

/// Immutable set of lessons and exercises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    lessons: Vec<Lesson>,
    exercises: Vec<Exercise>,
}

/// Lessons adjacent to a given lesson in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonNeighbors<'a> {
    pub previous: Option<&'a Lesson>,
    pub next: Option<&'a Lesson>,
}

impl Catalog {
    /// Build a catalog, rejecting blank or duplicate IDs within a category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::BlankId` or `CatalogError::DuplicateId`.
    pub fn new(lessons: Vec<Lesson>, exercises: Vec<Exercise>) -> Result<Self, CatalogError> {
        check_ids(&lessons)?;
        check_ids(&exercises)?;
        Ok(Self { lessons, exercises })
    }

    /// The catalog shipped with the application.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            lessons: builtin_lessons(),
            exercises: builtin_exercises(),
        }
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    #[must_use]
    pub fn lesson(&self, id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| lesson.id().as_str() == id)
    }

    #[must_use]
    pub fn exercise(&self, id: &str) -> Option<&Exercise> {
        self.exercises
            .iter()
            .find(|exercise| exercise.id().as_str() == id)
    }

    #[must_use]
    pub fn contains(&self, category: Category, id: &str) -> bool {
        match category {
            Category::Lessons => self.lesson(id).is_some(),
            Category::Exercises => self.exercise(id).is_some(),
        }
    }

    #[must_use]
    pub fn len(&self, category: Category) -> usize {
        match category {
            Category::Lessons => self.lessons.len(),
            Category::Exercises => self.exercises.len(),
        }
    }

    /// Previous and next lessons around `id`, or `None` if `id` is unknown.
    #[must_use]
    pub fn lesson_neighbors(&self, id: &str) -> Option<LessonNeighbors<'_>> {
        let index = self
            .lessons
            .iter()
            .position(|lesson| lesson.id().as_str() == id)?;
        Some(LessonNeighbors {
            previous: index.checked_sub(1).and_then(|i| self.lessons.get(i)),
            next: self.lessons.get(index + 1),
        })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Items not yet marked complete, in catalog order.
#[must_use]
pub fn pending<'a, T>(items: &[Hydrated<'a, T>]) -> Vec<Hydrated<'a, T>> {
    items.iter().filter(|item| !item.completed()).copied().collect()
}

/// Items already marked complete, in catalog order.
#[must_use]
pub fn completed<'a, T>(items: &[Hydrated<'a, T>]) -> Vec<Hydrated<'a, T>> {
    items.iter().filter(|item| item.completed()).copied().collect()
}

/// Lessons at `level`, in catalog order.
#[must_use]
pub fn at_level<'a>(
    lessons: &[Hydrated<'a, Lesson>],
    level: LessonLevel,
) -> Vec<Hydrated<'a, Lesson>> {
    lessons
        .iter()
        .filter(|lesson| lesson.level() == level)
        .copied()
        .collect()
}

fn check_ids<T: CatalogItem>(items: &[T]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        let id = item.item_id();
        if id.trim().is_empty() {
            return Err(CatalogError::BlankId {
                category: T::CATEGORY,
            });
        }
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                category: T::CATEGORY,
                id: id.to_owned(),
            });
        }
    }
    Ok(())
}

// ─── Built-in content ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
fn builtin_lessons() -> Vec<Lesson> {
    vec![
        Lesson::new(
            LessonId::new("1"),
            "مقدمة في بايثون",
            "تعرف على لغة بايثون وأساسياتها",
            "10 دقائق",
            LessonLevel::Beginner,
            vec![
                ContentBlock::text(
                    "بايثون هي لغة برمجة سهلة التعلم وقوية. تُستخدم في تطوير الويب، تحليل البيانات، الذكاء الاصطناعي، وأكثر!",
                ),
                ContentBlock::code("print(\"مرحباً بالعالم!\")"),
                ContentBlock::tip("بايثون تستخدم المسافات لتحديد الكتل البرمجية بدلاً من الأقواس"),
            ],
        ),
        Lesson::new(
            LessonId::new("2"),
            "المتغيرات والأنواع",
            "كيفية تخزين البيانات في بايثون",
            "15 دقيقة",
            LessonLevel::Beginner,
            vec![
                ContentBlock::text(
                    "المتغيرات هي حاويات لتخزين البيانات. في بايثون، لا تحتاج لتحديد نوع المتغير مسبقاً.",
                ),
                ContentBlock::code(
                    "name = \"أحمد\"\nage = 25\nheight = 1.75\nis_student = True",
                ),
                ContentBlock::tip("استخدم أسماء واضحة للمتغيرات لتسهيل قراءة الكود"),
            ],
        ),
        Lesson::new(
            LessonId::new("3"),
            "العمليات الحسابية",
            "الجمع والطرح والضرب والقسمة",
            "12 دقيقة",
            LessonLevel::Beginner,
            vec![
                ContentBlock::text("بايثون تدعم جميع العمليات الحسابية الأساسية والمتقدمة."),
                ContentBlock::code(
                    "x = 10\ny = 3\n\nprint(x + y)  # الجمع: 13\nprint(x - y)  # الطرح: 7\nprint(x * y)  # الضرب: 30\nprint(x / y)  # القسمة: 3.33\nprint(x ** y) # الأس: 1000",
                ),
            ],
        ),
        Lesson::new(
            LessonId::new("4"),
            "الشروط والقرارات",
            "if, elif, else - اتخاذ القرارات في الكود",
            "20 دقيقة",
            LessonLevel::Beginner,
            vec![
                ContentBlock::text(
                    "الجمل الشرطية تسمح لبرنامجك باتخاذ قرارات مختلفة بناءً على شروط معينة.",
                ),
                ContentBlock::code(
                    "age = 18\n\nif age >= 18:\n    print(\"أنت بالغ\")\nelif age >= 13:\n    print(\"أنت مراهق\")\nelse:\n    print(\"أنت طفل\")",
                ),
            ],
        ),
        Lesson::new(
            LessonId::new("5"),
            "الحلقات التكرارية",
            "for و while - تكرار الأوامر",
            "25 دقيقة",
            LessonLevel::Intermediate,
            vec![
                ContentBlock::text("الحلقات تسمح بتنفيذ نفس الكود عدة مرات."),
                ContentBlock::code(
                    "# حلقة for\nfor i in range(5):\n    print(i)\n\n# حلقة while\ncount = 0\nwhile count < 5:\n    print(count)\n    count += 1",
                ),
                ContentBlock::tip("احذر من الحلقات اللانهائية! تأكد دائماً من وجود شرط للتوقف"),
            ],
        ),
        Lesson::new(
            LessonId::new("6"),
            "القوائم",
            "تخزين مجموعات من البيانات",
            "18 دقيقة",
            LessonLevel::Intermediate,
            vec![
                ContentBlock::text("القوائم تسمح بتخزين عدة قيم في متغير واحد."),
                ContentBlock::code(
                    "fruits = [\"تفاح\", \"موز\", \"برتقال\"]\n\nprint(fruits[0])  # تفاح\nfruits.append(\"عنب\")\nprint(len(fruits))  # 4",
                ),
            ],
        ),
        Lesson::new(
            LessonId::new("7"),
            "الدوال",
            "إنشاء كتل كود قابلة لإعادة الاستخدام",
            "30 دقيقة",
            LessonLevel::Intermediate,
            vec![
                ContentBlock::text("الدوال تساعد في تنظيم الكود وإعادة استخدامه."),
                ContentBlock::code(
                    "def greet(name):\n    return f\"مرحباً {name}!\"\n\nmessage = greet(\"أحمد\")\nprint(message)",
                ),
            ],
        ),
        Lesson::new(
            LessonId::new("8"),
            "القواميس",
            "تخزين البيانات بمفاتيح",
            "20 دقيقة",
            LessonLevel::Advanced,
            vec![
                ContentBlock::text("القواميس تخزن البيانات كأزواج من المفاتيح والقيم."),
                ContentBlock::code(
                    "student = {\n    \"name\": \"سارة\",\n    \"age\": 20,\n    \"grade\": \"A\"\n}\n\nprint(student[\"name\"])  # سارة\nstudent[\"city\"] = \"الرياض\"",
                ),
            ],
        ),
    ]
}

fn builtin_exercises() -> Vec<Exercise> {
    vec![
        Exercise::new(
            ExerciseId::new("1"),
            "طباعة رسالة",
            "اطبع رسالة ترحيب",
            Difficulty::Easy,
            "المقدمة",
            "# اطبع 'مرحباً بايثون!'\n",
            "print(\"مرحباً بايثون!\")",
        ),
        Exercise::new(
            ExerciseId::new("2"),
            "إنشاء متغيرات",
            "أنشئ متغيرات لتخزين اسمك وعمرك",
            Difficulty::Easy,
            "المتغيرات",
            "# أنشئ متغير name يحتوي اسمك\n# أنشئ متغير age يحتوي عمرك\n",
            "name = \"أحمد\"\nage = 25",
        ),
        Exercise::new(
            ExerciseId::new("3"),
            "حساب المساحة",
            "احسب مساحة مستطيل",
            Difficulty::Easy,
            "العمليات",
            "length = 10\nwidth = 5\n# احسب المساحة وخزنها في متغير area\n",
            "length = 10\nwidth = 5\narea = length * width",
        ),
        Exercise::new(
            ExerciseId::new("4"),
            "فحص العمر",
            "اكتب كود يفحص إذا كان الشخص بالغاً",
            Difficulty::Medium,
            "الشروط",
            "age = 17\n# اطبع \"بالغ\" إذا كان العمر 18 أو أكثر\n# اطبع \"غير بالغ\" إذا كان أقل\n",
            "age = 17\nif age >= 18:\n    print(\"بالغ\")\nelse:\n    print(\"غير بالغ\")",
        ),
        Exercise::new(
            ExerciseId::new("5"),
            "جمع الأرقام",
            "اجمع الأرقام من 1 إلى 10",
            Difficulty::Medium,
            "الحلقات",
            "# استخدم حلقة لجمع الأرقام من 1 إلى 10\n# خزن النتيجة في متغير total\n",
            "total = 0\nfor i in range(1, 11):\n    total += i",
        ),
        Exercise::new(
            ExerciseId::new("6"),
            "إيجاد الأكبر",
            "اوجد أكبر رقم في قائمة",
            Difficulty::Medium,
            "القوائم",
            "numbers = [5, 2, 9, 1, 7]\n# اوجد أكبر رقم في القائمة\n",
            "numbers = [5, 2, 9, 1, 7]\nmax_num = max(numbers)",
        ),
        Exercise::new(
            ExerciseId::new("7"),
            "دالة الجمع",
            "اكتب دالة تجمع رقمين",
            Difficulty::Hard,
            "الدوال",
            "# اكتب دالة add تستقبل رقمين وترجع مجموعهما\n",
            "def add(a, b):\n    return a + b",
        ),
        Exercise::new(
            ExerciseId::new("8"),
            "عكس النص",
            "اكتب دالة تعكس نص",
            Difficulty::Hard,
            "الدوال",
            "# اكتب دالة reverse_text تستقبل نص وترجعه معكوساً\n",
            "def reverse_text(text):\n    return text[::-1]",
        ),
    ]
}
