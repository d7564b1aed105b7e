//! Built-in question block used when nothing could be scraped, so a run
//! always leaves at least one well-formed output file behind.

use crate::model::Question;
use crate::parser::dom;

pub const EXAMPLE_BLOCK: &str = r#"<div class="portlet-body"><div class="outside-text-wrapper"><div class="text-wrapper"><div class="text">Τι πρέπει να κάνετε βλέποντας αυτό το σήμα σε άλλη θέση πλην κόμβου:</div></div></div> <div class="image"><img src="/assets/testdrive/c001-01fb1441aa2f87040201ae7fee1880716077bfad54f3121cfea0d09524bc481e.jpg" alt="" class=""></div> <div class="options-wrapper"><div><div class="option correct">Να σταματήσετε στο ύψος της πινακίδας και να ξεκινήσετε όταν μπορείτε να το πράξετε χωρίς κίνδυνο.</div><div class="option">Να περάσετε με προσοχή χωρίς να σταματήσετε.</div></div></div> <hr style="margin: 10px;"> <div class="q-toolbar-small clearfix" style="margin-bottom: 0px;"><div class="labels"><span class="label label-info"><i aria-hidden="true" class="fa fa-book"></i> ΣΗΜΑΝΣΗ 1
</span> <span class="label q-label label-category-b"><i aria-hidden="true" class="fa fa-car"></i> αυτοκινητο
</span></div> <div class="translations"><button class="btn btn-link btn-lang gr"></button> <button class="btn btn-link btn-lang en"></button></div> <div class="q-buttons-small pull-right"><span><button disabled="disabled" class="btn-icon btn btn-circle blue btn-sm"><i aria-hidden="true" class="fa fa-info-circle"></i> ΕΠΕΞΗΓΗΣΗ</button></span> <button disabled="disabled" class="btn-icon btn btn-circle blue btn-sm"><i aria-hidden="true" class="fa fa-heart-o" style="margin-right: 5px;"></i>
            ΑΓΑΠΗΜΕΝΑ
          </button></div></div></div>"#;

pub fn example_question() -> Option<Question> {
    dom::parse_question_block(EXAMPLE_BLOCK)
}
