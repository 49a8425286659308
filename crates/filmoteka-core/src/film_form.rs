use chrono::{Datelike, Local};
use filmoteka_models::{Film, Person, Postava, Rankings};
use tracing::debug;
use crate::control::{FormControl, Validator};
use crate::error::{FieldError, FormError};

/// No film is older than the first public screening
pub const MIN_YEAR: i32 = 1895;

#[derive(Debug, Clone, PartialEq)]
pub struct PersonForm {
    /// Carried through untouched; not editable
    pub id: Option<u64>,
    pub krstne_meno: FormControl<String>,
    pub stredne_meno: FormControl<String>,
    pub priezvisko: FormControl<String>,
}

impl PersonForm {
    pub fn from_person(person: &Person) -> Self {
        Self {
            id: person.id,
            krstne_meno: FormControl::new(person.krstne_meno.clone()),
            stredne_meno: FormControl::new(person.stredne_meno.clone()),
            priezvisko: FormControl::new(person.priezvisko.clone()),
        }
    }

    pub fn value(&self) -> Person {
        Person {
            id: self.id,
            krstne_meno: self.krstne_meno.value().clone(),
            stredne_meno: self.stredne_meno.value().clone(),
            priezvisko: self.priezvisko.value().clone(),
        }
    }

    fn is_dirty(&self) -> bool {
        self.krstne_meno.is_dirty() || self.stredne_meno.is_dirty() || self.priezvisko.is_dirty()
    }

    fn mark_pristine(&mut self) {
        self.krstne_meno.mark_pristine();
        self.stredne_meno.mark_pristine();
        self.priezvisko.mark_pristine();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostavaForm {
    pub postava: FormControl<String>,
    pub dolezitost: FormControl<String>,
    pub herec: PersonForm,
}

impl PostavaForm {
    pub fn from_postava(postava: &Postava) -> Self {
        Self {
            postava: FormControl::new(postava.postava.clone()),
            dolezitost: FormControl::new(postava.dolezitost.clone()),
            herec: PersonForm::from_person(&postava.herec),
        }
    }

    pub fn value(&self) -> Postava {
        Postava {
            postava: self.postava.value().clone(),
            dolezitost: self.dolezitost.value().clone(),
            herec: self.herec.value(),
        }
    }

    fn is_dirty(&self) -> bool {
        self.postava.is_dirty() || self.dolezitost.is_dirty() || self.herec.is_dirty()
    }

    fn mark_pristine(&mut self) {
        self.postava.mark_pristine();
        self.dolezitost.mark_pristine();
        self.herec.mark_pristine();
    }
}

/// One optional rank control per ranking list, in display order.
///
/// Empty controls are left out of the value, so a film only lists the
/// rankings it actually has.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingGroup {
    controls: Vec<(String, FormControl<Option<u32>>)>,
}

impl RankingGroup {
    pub fn new(names: &[String]) -> Self {
        let mut group = Self { controls: Vec::new() };
        for name in names {
            group.ensure(name);
        }
        group
    }

    fn ensure(&mut self, name: &str) -> &mut FormControl<Option<u32>> {
        let index = match self.controls.iter().position(|(n, _)| n == name) {
            Some(index) => index,
            None => {
                self.controls.push((
                    name.to_string(),
                    FormControl::with_validators(None, vec![Validator::Min(1)]),
                ));
                self.controls.len() - 1
            }
        };
        &mut self.controls[index].1
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.controls.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<Option<u32>> {
        self.controls
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, control)| *control.value())
    }

    pub fn set(&mut self, name: &str, rank: Option<u32>) -> Result<(), FormError> {
        let (_, control) = self
            .controls
            .iter_mut()
            .find(|(n, _)| n == name)
            .ok_or_else(|| FormError::UnknownRanking(name.to_string()))?;
        control.set_value(rank);
        Ok(())
    }

    /// Load ranks from a film. Lists the film has but the group lacks get a
    /// control of their own so saving does not drop them.
    fn patch(&mut self, rankings: &Rankings) {
        for (_, control) in self.controls.iter_mut() {
            control.patch_value(None);
        }
        for (name, rank) in rankings {
            if !self.controls.iter().any(|(n, _)| n == name) {
                debug!("Film ranked in unconfigured list {:?}, keeping it", name);
            }
            self.ensure(name).patch_value(Some(*rank));
        }
    }

    pub fn value(&self) -> Rankings {
        self.controls
            .iter()
            .filter_map(|(name, control)| control.value().map(|rank| (name.clone(), rank)))
            .collect()
    }

    fn errors(&self) -> Vec<FieldError> {
        self.controls
            .iter()
            .flat_map(|(name, control)| {
                control.errors().into_iter().map(move |error| FieldError {
                    path: format!("poradieVRebricku.{}", name),
                    error,
                })
            })
            .collect()
    }

    fn is_dirty(&self) -> bool {
        self.controls.iter().any(|(_, c)| c.is_dirty())
    }

    fn mark_pristine(&mut self) {
        for (_, control) in self.controls.iter_mut() {
            control.mark_pristine();
        }
    }
}

/// Editable state of a film: scalar fields, the director and cast arrays and the rankings.
#[derive(Debug, Clone, PartialEq)]
pub struct FilmEditForm {
    pub nazov: FormControl<String>,
    pub rok: FormControl<Option<i32>>,
    pub slovensky_nazov: FormControl<String>,
    pub imdb_id: FormControl<String>,
    reziser: Vec<PersonForm>,
    postava: Vec<PostavaForm>,
    poradie_v_rebricku: RankingGroup,
    current_year: i32,
    structure_changed: bool,
}

fn check_index(list: &'static str, index: usize, len: usize) -> Result<(), FormError> {
    if index < len {
        Ok(())
    } else {
        Err(FormError::IndexOutOfRange { list, index, len })
    }
}

impl FilmEditForm {
    pub fn new(ranking_lists: &[String]) -> Self {
        Self::with_current_year(ranking_lists, Local::now().year())
    }

    /// Blank form whose year may not exceed `current_year`
    pub fn with_current_year(ranking_lists: &[String], current_year: i32) -> Self {
        Self {
            nazov: FormControl::with_validators(String::new(), vec![Validator::Required]),
            rok: FormControl::with_validators(
                Some(0),
                vec![
                    Validator::Required,
                    Validator::Min(i64::from(MIN_YEAR)),
                    Validator::Max(i64::from(current_year)),
                ],
            ),
            slovensky_nazov: FormControl::new(String::new()),
            imdb_id: FormControl::new(String::new()),
            reziser: Vec::new(),
            postava: Vec::new(),
            poradie_v_rebricku: RankingGroup::new(ranking_lists),
            current_year,
            structure_changed: false,
        }
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Load a film into the form, rebuilding the director and cast arrays
    pub fn populate(&mut self, film: &Film) {
        self.nazov.patch_value(film.nazov.clone());
        self.rok.patch_value(Some(film.rok));
        self.slovensky_nazov.patch_value(film.slovensky_nazov.clone());
        self.imdb_id.patch_value(film.imdb_id.clone());
        self.poradie_v_rebricku.patch(&film.poradie_v_rebricku);

        self.reziser = film.reziser.iter().map(PersonForm::from_person).collect();
        self.postava = film.postava.iter().map(PostavaForm::from_postava).collect();

        self.mark_pristine();
        debug!(
            "Form populated: {} director(s), {} cast entries",
            self.reziser.len(),
            self.postava.len()
        );
    }

    pub fn reziser(&self) -> &[PersonForm] {
        &self.reziser
    }

    pub fn director_mut(&mut self, index: usize) -> Result<&mut PersonForm, FormError> {
        check_index("reziser", index, self.reziser.len())?;
        Ok(&mut self.reziser[index])
    }

    /// Append a director, returning its index
    pub fn add_director(&mut self, person: &Person) -> usize {
        self.reziser.push(PersonForm::from_person(person));
        self.structure_changed = true;
        self.reziser.len() - 1
    }

    pub fn remove_director(&mut self, index: usize) -> Result<Person, FormError> {
        check_index("reziser", index, self.reziser.len())?;
        self.structure_changed = true;
        Ok(self.reziser.remove(index).value())
    }

    pub fn move_director(&mut self, from: usize, to: usize) -> Result<(), FormError> {
        check_index("reziser", from, self.reziser.len())?;
        check_index("reziser", to, self.reziser.len())?;
        let entry = self.reziser.remove(from);
        self.reziser.insert(to, entry);
        self.structure_changed = true;
        Ok(())
    }

    pub fn postava(&self) -> &[PostavaForm] {
        &self.postava
    }

    pub fn character_mut(&mut self, index: usize) -> Result<&mut PostavaForm, FormError> {
        check_index("postava", index, self.postava.len())?;
        Ok(&mut self.postava[index])
    }

    /// Append a cast entry, returning its index
    pub fn add_character(&mut self, postava: &Postava) -> usize {
        self.postava.push(PostavaForm::from_postava(postava));
        self.structure_changed = true;
        self.postava.len() - 1
    }

    pub fn remove_character(&mut self, index: usize) -> Result<Postava, FormError> {
        check_index("postava", index, self.postava.len())?;
        self.structure_changed = true;
        Ok(self.postava.remove(index).value())
    }

    pub fn move_character(&mut self, from: usize, to: usize) -> Result<(), FormError> {
        check_index("postava", from, self.postava.len())?;
        check_index("postava", to, self.postava.len())?;
        let entry = self.postava.remove(from);
        self.postava.insert(to, entry);
        self.structure_changed = true;
        Ok(())
    }

    pub fn rankings(&self) -> &RankingGroup {
        &self.poradie_v_rebricku
    }

    pub fn set_ranking(&mut self, name: &str, rank: Option<u32>) -> Result<(), FormError> {
        self.poradie_v_rebricku.set(name, rank)
    }

    pub fn errors(&self) -> Vec<FieldError> {
        let scalar = [
            ("nazov", self.nazov.errors()),
            ("rok", self.rok.errors()),
            ("slovenskyNazov", self.slovensky_nazov.errors()),
            ("imdbID", self.imdb_id.errors()),
        ];

        let mut errors: Vec<FieldError> = scalar
            .into_iter()
            .flat_map(|(path, errors)| {
                errors.into_iter().map(move |error| FieldError {
                    path: path.to_string(),
                    error,
                })
            })
            .collect();
        errors.extend(self.poradie_v_rebricku.errors());
        errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Whether anything changed since the form was created or populated
    pub fn is_dirty(&self) -> bool {
        self.structure_changed
            || self.nazov.is_dirty()
            || self.rok.is_dirty()
            || self.slovensky_nazov.is_dirty()
            || self.imdb_id.is_dirty()
            || self.reziser.iter().any(PersonForm::is_dirty)
            || self.postava.iter().any(PostavaForm::is_dirty)
            || self.poradie_v_rebricku.is_dirty()
    }

    pub fn mark_pristine(&mut self) {
        self.structure_changed = false;
        self.nazov.mark_pristine();
        self.rok.mark_pristine();
        self.slovensky_nazov.mark_pristine();
        self.imdb_id.mark_pristine();
        self.reziser.iter_mut().for_each(PersonForm::mark_pristine);
        self.postava.iter_mut().for_each(PostavaForm::mark_pristine);
        self.poradie_v_rebricku.mark_pristine();
    }

    /// Produce the record to save: `base` (the loaded film) with every form value applied.
    ///
    /// Text fields are trimmed, the arrays replace the film's lists in order and only
    /// rankings with a value are kept. The film's `id` is preserved.
    pub fn submit(&self, base: &Film) -> Result<Film, FormError> {
        let errors = self.errors();
        if !errors.is_empty() {
            return Err(FormError::Invalid(errors));
        }

        let rok = self
            .rok
            .value()
            .ok_or_else(|| FormError::Invalid(Vec::new()))?;

        Ok(Film {
            id: base.id,
            nazov: self.nazov.value().trim().to_string(),
            rok,
            slovensky_nazov: self.slovensky_nazov.value().trim().to_string(),
            imdb_id: self.imdb_id.value().trim().to_string(),
            reziser: self.reziser.iter().map(PersonForm::value).collect(),
            postava: self.postava.iter().map(PostavaForm::value).collect(),
            poradie_v_rebricku: self.poradie_v_rebricku.value(),
        })
    }
}
